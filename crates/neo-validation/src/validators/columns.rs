//! Column validator: required-column presence and the bounded healing
//! policy for minor schema drift.

use crate::config::PipelineConfig;
use crate::error::{Result, ValidationError};
use crate::report::ValidationReport;
use crate::schema::FeatureSchema;
use polars::prelude::*;
use tracing::{info, warn};

/// Check that all required columns are present, healing a bounded amount
/// of drift.
///
/// - More than `config.max_missing_columns` absent required columns is a
///   hard rejection with [`ValidationError::SchemaTooIncomplete`].
/// - Up to that many absent columns are synthesized as constant columns
///   of the configured default mean (`0.0` when the schema has none).
/// - A table with nothing missing passes through unchanged.
pub fn ensure_required_columns(
    mut df: DataFrame,
    schema: &FeatureSchema,
    config: &PipelineConfig,
    report: &mut ValidationReport,
) -> Result<DataFrame> {
    let present: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
    let missing: Vec<String> = schema
        .feature_names()
        .into_iter()
        .filter(|name| !present.contains(name))
        .map(|name| name.to_string())
        .collect();

    if missing.len() > config.max_missing_columns {
        warn!("rejecting input: {} required columns absent", missing.len());
        return Err(ValidationError::SchemaTooIncomplete { missing });
    }

    for name in &missing {
        let default = schema.default_for(name).unwrap_or(0.0);
        let values = vec![default; df.height()];
        df.with_column(Series::new(name.as_str().into(), values))?;

        info!("missing column '{}' backfilled with default mean {}", name, default);
        report.add_action(format!(
            "Synthesized missing column '{}' with default mean {}",
            name, default
        ));
        report.synthesized_columns.push(name.clone());
    }

    Ok(df)
}
