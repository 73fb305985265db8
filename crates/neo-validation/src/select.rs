//! Feature selector: project the validated table down to the exact
//! ordered feature set the classifier expects.

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::schema::FeatureSchema;
use polars::prelude::*;

/// Project to exactly the required features, in schema order.
///
/// When `config.keep_label` is set and the schema's label column is
/// present, it is retained as a trailing column (the standalone CLI uses
/// this; the serving path never does). No columns are fabricated here,
/// since earlier stages guarantee every required column exists.
pub fn select_features(
    df: DataFrame,
    schema: &FeatureSchema,
    config: &PipelineConfig,
) -> Result<DataFrame> {
    let mut wanted = schema.feature_names();

    if config.keep_label
        && let Some(label) = schema.label()
        && df.column(label).is_ok()
    {
        wanted.push(label);
    }

    Ok(df.select(wanted)?)
}
