//! Audit report of what the pipeline did to a dataset.
//!
//! Healing actions (synthesized columns, filled values, removed
//! duplicates) are diagnostic only; they never change the success/failure
//! outcome of validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Human-readable summary of a validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Data rows in the parsed input.
    pub rows_before: usize,
    /// Data rows in the validated output.
    pub rows_after: usize,
    /// Exact duplicate rows removed.
    pub duplicates_removed: usize,

    /// Required columns that were absent and synthesized from defaults.
    pub synthesized_columns: Vec<String>,
    /// Columns whose missing values were filled with default means.
    pub filled_columns: Vec<String>,

    /// Ordered list of healing actions taken.
    pub actions: Vec<String>,

    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self {
            rows_before: 0,
            rows_after: 0,
            duplicates_removed: 0,
            synthesized_columns: Vec::new(),
            filled_columns: Vec::new(),
            actions: Vec::new(),
            generated_at: Utc::now(),
        }
    }
}

impl ValidationReport {
    /// Create a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a healing action.
    pub fn add_action(&mut self, action: impl Into<String>) {
        self.actions.push(action.into());
    }

    /// Whether any healing was applied.
    pub fn was_healed(&self) -> bool {
        !self.synthesized_columns.is_empty() || !self.filled_columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_defaults() {
        let report = ValidationReport::new();
        assert_eq!(report.rows_before, 0);
        assert!(report.actions.is_empty());
        assert!(!report.was_healed());
    }

    #[test]
    fn test_was_healed() {
        let mut report = ValidationReport::new();
        report.synthesized_columns.push("Inclination".to_string());
        assert!(report.was_healed());
    }

    #[test]
    fn test_report_serialization() {
        let mut report = ValidationReport::new();
        report.rows_before = 10;
        report.rows_after = 8;
        report.duplicates_removed = 2;
        report.add_action("Removed 2 duplicate rows");

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("duplicates_removed"));
        assert!(json.contains("Removed 2 duplicate rows"));
    }
}
