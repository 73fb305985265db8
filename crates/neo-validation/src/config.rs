//! Configuration for the validation pipeline.
//!
//! Uses the builder pattern for flexible and ergonomic setup. The defaults
//! reproduce the strict production behavior; the coercing type-check is an
//! explicit opt-in.

use serde::{Deserialize, Serialize};

/// How the type validator treats a required column that is not numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CoercionMode {
    /// Reject a present-but-non-numeric column immediately.
    #[default]
    Strict,
    /// Attempt to parse each value as a number; reject only when a value
    /// fails to parse.
    Coerce,
}

/// Configuration for the validation pipeline.
///
/// Use [`PipelineConfig::builder()`] to create a configuration with a
/// fluent API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Type-check strictness for required numeric columns.
    /// Default: Strict
    pub coercion_mode: CoercionMode,

    /// Maximum number of absent required columns that will be healed by
    /// synthesizing defaults. One more than this is a hard rejection.
    /// Default: 2
    pub max_missing_columns: usize,

    /// Maximum missing values a single row may carry before the whole
    /// dataset is rejected.
    /// Default: 2
    pub max_row_missing: usize,

    /// Whether to remove exact duplicate rows (first occurrence wins).
    /// Default: true
    pub remove_duplicates: bool,

    /// Whether to retain the label column in the output when present.
    /// Used by the standalone CLI, not by the serving path.
    /// Default: false
    pub keep_label: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            coercion_mode: CoercionMode::default(),
            max_missing_columns: 2,
            max_row_missing: 2,
            remove_duplicates: true,
            keep_label: false,
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.max_missing_columns == 0 {
            return Err(ConfigValidationError::InvalidLimit {
                field: "max_missing_columns",
                value: self.max_missing_columns,
            });
        }
        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid limit for '{field}': {value} (must be at least 1)")]
    InvalidLimit { field: &'static str, value: usize },
}

/// Builder for [`PipelineConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    coercion_mode: Option<CoercionMode>,
    max_missing_columns: Option<usize>,
    max_row_missing: Option<usize>,
    remove_duplicates: Option<bool>,
    keep_label: Option<bool>,
}

impl PipelineConfigBuilder {
    /// Set the type-check strictness.
    pub fn coercion_mode(mut self, mode: CoercionMode) -> Self {
        self.coercion_mode = Some(mode);
        self
    }

    /// Set how many absent required columns are healed before rejection.
    pub fn max_missing_columns(mut self, limit: usize) -> Self {
        self.max_missing_columns = Some(limit);
        self
    }

    /// Set the per-row missing-value cap.
    pub fn max_row_missing(mut self, limit: usize) -> Self {
        self.max_row_missing = Some(limit);
        self
    }

    /// Enable or disable duplicate row removal.
    pub fn remove_duplicates(mut self, remove: bool) -> Self {
        self.remove_duplicates = Some(remove);
        self
    }

    /// Retain the label column in the output when present.
    pub fn keep_label(mut self, keep: bool) -> Self {
        self.keep_label = Some(keep);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `PipelineConfig` or an error if validation fails.
    pub fn build(self) -> Result<PipelineConfig, ConfigValidationError> {
        let config = PipelineConfig {
            coercion_mode: self.coercion_mode.unwrap_or_default(),
            max_missing_columns: self.max_missing_columns.unwrap_or(2),
            max_row_missing: self.max_row_missing.unwrap_or(2),
            remove_duplicates: self.remove_duplicates.unwrap_or(true),
            keep_label: self.keep_label.unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }
}
