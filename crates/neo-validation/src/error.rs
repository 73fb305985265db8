//! Error types for the input-validation pipeline.
//!
//! Every failure mode a caller can observe is a variant here. All variants
//! are terminal for the current request; nothing is retried internally.
//!
//! Errors are serializable as `{code, message}`; the CLI `--json` mode
//! emits failures in that shape.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for input validation and feature preparation.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The input text could not be parsed as tabular data.
    #[error("Failed to parse input as CSV: {0}")]
    MalformedInput(String),

    /// Three or more required columns are absent. Hard rejection.
    #[error("Too many required columns are missing: {missing:?}")]
    SchemaTooIncomplete { missing: Vec<String> },

    /// A required column is present but not numeric (or not coercible).
    #[error("Column '{column}' must be numeric")]
    NonNumericColumn { column: String },

    /// One or more rows exceed the per-row missing-value cap.
    /// The whole dataset is rejected, not filtered.
    #[error("{offending} row(s) have more than {limit} missing values; dataset rejected")]
    RowTooIncomplete { offending: usize, limit: usize },

    /// A column has missing values but no configured default mean.
    #[error("No default mean provided for column '{0}'")]
    NoDefaultAvailable(String),

    /// The table has no data rows.
    #[error("Input contains no data rows")]
    EmptyDataset,

    /// A required feature is absent after validation supposedly
    /// guaranteed it. Defensive check at the prediction boundary.
    #[error("Required feature '{0}' missing after validation")]
    FeatureMissing(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ValidationError {
    /// Stable error code for programmatic handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedInput(_) => "MALFORMED_INPUT",
            Self::SchemaTooIncomplete { .. } => "SCHEMA_TOO_INCOMPLETE",
            Self::NonNumericColumn { .. } => "NON_NUMERIC_COLUMN",
            Self::RowTooIncomplete { .. } => "ROW_TOO_INCOMPLETE",
            Self::NoDefaultAvailable(_) => "NO_DEFAULT_AVAILABLE",
            Self::EmptyDataset => "EMPTY_DATASET",
            Self::FeatureMissing(_) => "FEATURE_MISSING",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
        }
    }

    /// Whether this error was caused by the caller's input rather than an
    /// internal fault. Drives the 400-vs-500 split at the HTTP boundary.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Io(_) | Self::Polars(_) | Self::Json(_))
    }
}

/// Serialized as a struct with `code` and `message` fields.
impl Serialize for ValidationError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ValidationError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for validation operations.
pub type Result<T> = std::result::Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(ValidationError::EmptyDataset.error_code(), "EMPTY_DATASET");
        assert_eq!(
            ValidationError::NoDefaultAvailable("Inclination".to_string()).error_code(),
            "NO_DEFAULT_AVAILABLE"
        );
    }

    #[test]
    fn test_is_client_error() {
        assert!(ValidationError::EmptyDataset.is_client_error());
        assert!(
            ValidationError::SchemaTooIncomplete {
                missing: vec!["Inclination".to_string()]
            }
            .is_client_error()
        );
        let io = ValidationError::Io(std::io::Error::other("boom"));
        assert!(!io.is_client_error());
    }

    #[test]
    fn test_error_serialization() {
        let error = ValidationError::NonNumericColumn {
            column: "Absolute Magnitude".to_string(),
        };
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("NON_NUMERIC_COLUMN"));
        assert!(json.contains("Absolute Magnitude"));
    }

    #[test]
    fn test_schema_too_incomplete_lists_names() {
        let error = ValidationError::SchemaTooIncomplete {
            missing: vec!["Inclination".to_string(), "Avg_Diameter_KM".to_string()],
        };
        let msg = error.to_string();
        assert!(msg.contains("Inclination"));
        assert!(msg.contains("Avg_Diameter_KM"));
    }
}
