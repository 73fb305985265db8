//! Type validator: required columns must be numeric.
//!
//! Two strictness modes: [`CoercionMode::Strict`] rejects a non-numeric
//! column outright, [`CoercionMode::Coerce`] tries to parse every value
//! first and rejects only when one fails.

use crate::config::{CoercionMode, PipelineConfig};
use crate::error::{Result, ValidationError};
use crate::schema::FeatureSchema;
use crate::utils::is_numeric_dtype;
use polars::prelude::*;
use tracing::debug;

/// Check (and in coercing mode, convert) the required columns to a
/// numeric type.
///
/// Fails with [`ValidationError::NonNumericColumn`] naming the first
/// offending column. Columns are expected to exist already; the column
/// validator runs earlier in the pipeline.
pub fn ensure_numeric_columns(
    mut df: DataFrame,
    schema: &FeatureSchema,
    config: &PipelineConfig,
) -> Result<DataFrame> {
    // Zero-row columns carry no values to type-check, and the CSV reader
    // types them as String. Let the row-count check report instead.
    if df.height() == 0 {
        return Ok(df);
    }

    for name in schema.feature_names() {
        let series = df.column(name)?.as_materialized_series().clone();

        if is_numeric_dtype(series.dtype()) {
            continue;
        }

        match config.coercion_mode {
            CoercionMode::Strict => {
                return Err(ValidationError::NonNumericColumn {
                    column: name.to_string(),
                });
            }
            CoercionMode::Coerce => {
                // Non-strict cast: unparseable values become null, so any
                // increase in null count means a value failed to coerce.
                let nulls_before = series.null_count();
                let cast = series.cast(&DataType::Float64).map_err(|_| {
                    ValidationError::NonNumericColumn {
                        column: name.to_string(),
                    }
                })?;

                if cast.null_count() > nulls_before {
                    return Err(ValidationError::NonNumericColumn {
                        column: name.to_string(),
                    });
                }

                debug!("coerced column '{}' to Float64", name);
                df.replace(name, cast)?;
            }
        }
    }

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FeatureSpec;

    fn two_feature_schema() -> FeatureSchema {
        FeatureSchema::new(
            vec![
                FeatureSpec {
                    name: "a".to_string(),
                    default_mean: Some(0.0),
                },
                FeatureSpec {
                    name: "b".to_string(),
                    default_mean: Some(0.0),
                },
            ],
            None,
        )
    }

    fn config(mode: CoercionMode) -> PipelineConfig {
        PipelineConfig::builder().coercion_mode(mode).build().unwrap()
    }

    #[test]
    fn test_numeric_columns_pass_both_modes() {
        for mode in [CoercionMode::Strict, CoercionMode::Coerce] {
            let df = df!["a" => [1.0, 2.0], "b" => [3i64, 4]].unwrap();
            let out =
                ensure_numeric_columns(df, &two_feature_schema(), &config(mode)).unwrap();
            assert_eq!(out.height(), 2);
        }
    }

    #[test]
    fn test_zero_row_string_columns_pass_through() {
        // A header-only CSV parses every column as String with no rows;
        // the type check must not reject it ahead of the row-count check.
        let df = df![
            "a" => Vec::<&str>::new(),
            "b" => Vec::<&str>::new(),
        ]
        .unwrap();

        let out = ensure_numeric_columns(df, &two_feature_schema(), &config(CoercionMode::Strict))
            .unwrap();
        assert_eq!(out.height(), 0);
    }

    #[test]
    fn test_strict_rejects_string_column() {
        let df = df!["a" => [1.0, 2.0], "b" => ["3", "4"]].unwrap();
        let err = ensure_numeric_columns(df, &two_feature_schema(), &config(CoercionMode::Strict))
            .unwrap_err();

        match err {
            ValidationError::NonNumericColumn { column } => assert_eq!(column, "b"),
            other => panic!("expected NonNumericColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_coerce_parses_numeric_strings() {
        let df = df!["a" => [1.0, 2.0], "b" => ["3.5", "4.5"]].unwrap();
        let out = ensure_numeric_columns(df, &two_feature_schema(), &config(CoercionMode::Coerce))
            .unwrap();

        let b = out.column("b").unwrap();
        assert!(matches!(b.dtype(), DataType::Float64));
        assert_eq!(b.get(0).unwrap().try_extract::<f64>().unwrap(), 3.5);
    }

    #[test]
    fn test_coerce_rejects_unparseable_value() {
        let df = df!["a" => [1.0, 2.0], "b" => ["3.5", "not-a-number"]].unwrap();
        let err = ensure_numeric_columns(df, &two_feature_schema(), &config(CoercionMode::Coerce))
            .unwrap_err();

        match err {
            ValidationError::NonNumericColumn { column } => assert_eq!(column, "b"),
            other => panic!("expected NonNumericColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_coerce_preserves_existing_nulls() {
        let df = df!["a" => [1.0, 2.0], "b" => [Some("3.5"), None]].unwrap();
        let out = ensure_numeric_columns(df, &two_feature_schema(), &config(CoercionMode::Coerce))
            .unwrap();
        assert_eq!(out.column("b").unwrap().null_count(), 1);
    }
}
