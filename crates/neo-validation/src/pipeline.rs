//! The validation pipeline: stage composition from raw CSV text to a
//! prediction-ready feature table.

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::ingest;
use crate::report::ValidationReport;
use crate::schema::FeatureSchema;
use crate::select::select_features;
use crate::validators::{
    deduplicate_rows, ensure_nonempty, ensure_numeric_columns, ensure_required_columns,
    fill_missing_values, reject_incomplete_rows,
};
use polars::prelude::*;
use std::path::Path;
use tracing::info;

/// A successfully validated table plus the audit trail of what was done
/// to it. Validation either produces this or a typed error, never both.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    /// The cleaned table: exactly the required features, in order, no
    /// missing values, no duplicate rows.
    pub data: DataFrame,
    /// Healing actions and row accounting.
    pub report: ValidationReport,
}

/// The unified input-validation and feature-preparation pipeline.
///
/// Shared by the HTTP service and the standalone CLI; behavioral
/// differences between the two are [`PipelineConfig`] flags.
///
/// Stage order: ingest → column check → row missing-cap → value fill →
/// type check → row-count check → deduplication → feature projection.
#[derive(Debug, Clone)]
pub struct ValidationPipeline {
    schema: FeatureSchema,
    config: PipelineConfig,
}

static_assertions::assert_impl_all!(ValidationPipeline: Send, Sync);

impl ValidationPipeline {
    /// Create a pipeline from an explicit schema and configuration.
    pub fn new(schema: FeatureSchema, config: PipelineConfig) -> Self {
        Self { schema, config }
    }

    /// The production pipeline: six-feature NEO hazard schema, strict
    /// type checking.
    pub fn neo_hazard() -> Self {
        Self::new(FeatureSchema::neo_hazard(), PipelineConfig::default())
    }

    /// The schema this pipeline validates against.
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// The active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Validate raw CSV text.
    pub fn validate_csv(&self, text: &str) -> Result<ValidationOutcome> {
        let df = ingest::read_csv_str(text)?;
        self.validate_frame(df)
    }

    /// Validate a CSV file on disk (CLI path).
    pub fn validate_file(&self, path: &Path) -> Result<ValidationOutcome> {
        let df = ingest::read_csv_path(path)?;
        self.validate_frame(df)
    }

    /// Run every validation stage on an already-ingested table.
    pub fn validate_frame(&self, df: DataFrame) -> Result<ValidationOutcome> {
        let mut report = ValidationReport::new();
        report.rows_before = df.height();

        let df = ensure_required_columns(df, &self.schema, &self.config, &mut report)?;
        let df = reject_incomplete_rows(df, &self.config)?;
        let df = fill_missing_values(df, &self.schema, &mut report)?;
        let df = ensure_numeric_columns(df, &self.schema, &self.config)?;
        let df = ensure_nonempty(df)?;
        let df = if self.config.remove_duplicates {
            deduplicate_rows(df, &mut report)?
        } else {
            df
        };
        let df = select_features(df, &self.schema, &self.config)?;

        report.rows_after = df.height();
        info!(
            "input validated: {} rows in, {} rows out, {} healing action(s)",
            report.rows_before,
            report.rows_after,
            report.actions.len()
        );

        Ok(ValidationOutcome { data: df, report })
    }
}
