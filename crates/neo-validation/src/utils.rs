//! Shared polars helpers used across the validators.

use polars::prelude::*;

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Fill null values in a numeric Series with a specific value.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let mask = series.is_null();
    let len = series.len();
    let mut result_vec = Vec::with_capacity(len);

    for i in 0..len {
        if mask.get(i).unwrap_or(false) {
            result_vec.push(Some(fill_value));
        } else {
            let val = series.get(i)?;
            result_vec.push(Some(val.try_extract::<f64>()?));
        }
    }

    Ok(Series::new(series.name().clone(), result_vec))
}

/// Fill null values in a string Series with a specific value.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let mask = series.is_null();
    let len = series.len();
    let mut result_vec = Vec::with_capacity(len);

    for i in 0..len {
        if mask.get(i).unwrap_or(false) {
            result_vec.push(Some(fill_value.to_string()));
        } else {
            let val = series.get(i)?;
            result_vec.push(Some(format!("{}", val)));
        }
    }

    Ok(Series::new(series.name().clone(), result_vec))
}

/// Count null values per row across all columns.
pub fn row_null_counts(df: &DataFrame) -> PolarsResult<Series> {
    let mut null_counts = Series::new("nulls".into(), vec![0u32; df.height()]);
    for col in df.get_columns() {
        let series = col.as_materialized_series();
        let null_int = series.is_null().cast(&DataType::UInt32)?;
        null_counts = (&null_counts + &null_int)?;
    }
    Ok(null_counts)
}
