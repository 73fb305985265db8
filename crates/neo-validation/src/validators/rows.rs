//! Row validator: per-row missing-value cap, default-mean fill,
//! empty-dataset rejection, and stable deduplication.

use crate::config::PipelineConfig;
use crate::error::{Result, ValidationError};
use crate::report::ValidationReport;
use crate::schema::FeatureSchema;
use crate::utils::{fill_numeric_nulls, fill_string_nulls, is_numeric_dtype, row_null_counts};
use polars::prelude::*;
use tracing::{debug, info};

/// Reject the whole dataset if any row carries more than
/// `config.max_row_missing` missing values among its columns.
///
/// This is a reject-all policy: one bad row poisons the file. No
/// per-row filtering happens here.
pub fn reject_incomplete_rows(df: DataFrame, config: &PipelineConfig) -> Result<DataFrame> {
    if df.width() == 0 || df.height() == 0 {
        return Ok(df);
    }

    let null_counts = row_null_counts(&df)?;
    let counts = null_counts.u32()?;
    let limit = config.max_row_missing as u32;
    let offending = counts.into_iter().flatten().filter(|&c| c > limit).count();

    if offending > 0 {
        return Err(ValidationError::RowTooIncomplete {
            offending,
            limit: config.max_row_missing,
        });
    }

    Ok(df)
}

/// Fill remaining missing values per column with the configured default
/// mean. A null-bearing column without a default is a terminal error.
pub fn fill_missing_values(
    mut df: DataFrame,
    schema: &FeatureSchema,
    report: &mut ValidationReport,
) -> Result<DataFrame> {
    let null_bearing: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|col| col.null_count() > 0)
        .map(|col| col.name().to_string())
        .collect();

    for name in null_bearing {
        let Some(default) = schema.default_for(&name) else {
            return Err(ValidationError::NoDefaultAvailable(name));
        };

        let series = df.column(&name)?.as_materialized_series().clone();
        let filled = if is_numeric_dtype(series.dtype()) {
            fill_numeric_nulls(&series, default)?
        } else if series.null_count() == series.len() {
            // An all-empty CSV column is read as String; it carries no
            // type information, so fill it as numeric.
            Series::new(series.name().clone(), vec![default; series.len()])
        } else {
            // Non-numeric columns are healed textually; the type validator
            // decides later whether the column is acceptable.
            fill_string_nulls(&series, &default.to_string())?
        };
        df.replace(&name, filled)?;

        info!("missing values in '{}' filled with default mean {}", name, default);
        report.add_action(format!(
            "Filled missing values in '{}' with default mean {}",
            name, default
        ));
        report.filled_columns.push(name);
    }

    Ok(df)
}

/// Reject a table with zero data rows.
pub fn ensure_nonempty(df: DataFrame) -> Result<DataFrame> {
    if df.height() == 0 {
        return Err(ValidationError::EmptyDataset);
    }
    Ok(df)
}

/// Remove exact duplicate rows, keeping the first occurrence and the
/// relative order of survivors.
pub fn deduplicate_rows(df: DataFrame, report: &mut ValidationReport) -> Result<DataFrame> {
    let before = df.height();
    let df = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
    let removed = before - df.height();

    if removed > 0 {
        debug!("removed {} duplicate rows", removed);
        report.add_action(format!("Removed {} duplicate rows", removed));
    }
    report.duplicates_removed += removed;

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> FeatureSchema {
        FeatureSchema::neo_hazard()
    }

    fn config() -> PipelineConfig {
        PipelineConfig::default()
    }

    #[test]
    fn test_rows_within_cap_pass() {
        let df = df![
            "a" => [Some(1.0), None],
            "b" => [Some(1.0), None],
            "c" => [Some(1.0), Some(2.0)],
        ]
        .unwrap();
        // Worst row has 2 missing values, which is exactly the cap.
        assert!(reject_incomplete_rows(df, &config()).is_ok());
    }

    #[test]
    fn test_row_over_cap_rejects_whole_dataset() {
        let df = df![
            "a" => [Some(1.0), None],
            "b" => [Some(1.0), None],
            "c" => [Some(1.0), None],
        ]
        .unwrap();

        let err = reject_incomplete_rows(df, &config()).unwrap_err();
        match err {
            ValidationError::RowTooIncomplete { offending, limit } => {
                assert_eq!(offending, 1);
                assert_eq!(limit, 2);
            }
            other => panic!("expected RowTooIncomplete, got {:?}", other),
        }
    }

    #[test]
    fn test_fill_uses_configured_default() {
        let df = df![
            "Inclination" => [Some(0.1), None],
        ]
        .unwrap();

        let mut report = ValidationReport::new();
        let out = fill_missing_values(df, &schema(), &mut report).unwrap();

        let col = out.column("Inclination").unwrap();
        assert_eq!(col.null_count(), 0);
        assert_eq!(
            col.get(1).unwrap().try_extract::<f64>().unwrap(),
            0.04022213144882968
        );
        assert_eq!(report.filled_columns, vec!["Inclination".to_string()]);
    }

    #[test]
    fn test_all_null_column_is_filled_numerically() {
        let df = df![
            "Inclination" => [None::<&str>, None],
        ]
        .unwrap();

        let mut report = ValidationReport::new();
        let out = fill_missing_values(df, &schema(), &mut report).unwrap();

        let col = out.column("Inclination").unwrap();
        assert!(matches!(col.dtype(), DataType::Float64));
        assert_eq!(
            col.get(0).unwrap().try_extract::<f64>().unwrap(),
            0.04022213144882968
        );
    }

    #[test]
    fn test_fill_without_default_fails() {
        let df = df![
            "Hazardous" => [Some(1.0), None],
        ]
        .unwrap();

        let mut report = ValidationReport::new();
        let err = fill_missing_values(df, &schema(), &mut report).unwrap_err();
        match err {
            ValidationError::NoDefaultAvailable(col) => assert_eq!(col, "Hazardous"),
            other => panic!("expected NoDefaultAvailable, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let df = df!["a" => Vec::<f64>::new()].unwrap();
        let err = ensure_nonempty(df).unwrap_err();
        assert_eq!(err.error_code(), "EMPTY_DATASET");
    }

    #[test]
    fn test_deduplication_keeps_first_and_order() {
        let df = df![
            "a" => [1.0, 2.0, 1.0, 3.0],
            "b" => [1.0, 2.0, 1.0, 3.0],
        ]
        .unwrap();

        let mut report = ValidationReport::new();
        let out = deduplicate_rows(df, &mut report).unwrap();

        assert_eq!(out.height(), 3);
        assert_eq!(report.duplicates_removed, 1);
        let a = out.column("a").unwrap();
        assert_eq!(a.get(0).unwrap().try_extract::<f64>().unwrap(), 1.0);
        assert_eq!(a.get(1).unwrap().try_extract::<f64>().unwrap(), 2.0);
        assert_eq!(a.get(2).unwrap().try_extract::<f64>().unwrap(), 3.0);
    }

    #[test]
    fn test_deduplication_is_idempotent() {
        let df = df![
            "a" => [1.0, 1.0, 2.0],
        ]
        .unwrap();

        let mut report = ValidationReport::new();
        let once = deduplicate_rows(df, &mut report).unwrap();
        let twice = deduplicate_rows(once.clone(), &mut report).unwrap();
        assert!(once.equals(&twice));
    }
}
