//! Conversion between JSON row-objects and DataFrames.
//!
//! Used by the trusted-passthrough request path (row-objects in) and by
//! the response body (row-objects out).

use crate::error::{Result, ValidationError};
use polars::prelude::*;
use serde_json::{Map, Value};

/// A single row as a JSON object: column name to value.
pub type Record = Map<String, Value>;

/// Build a DataFrame from JSON row-objects.
///
/// Columns follow first-seen key order; keys absent from a row become
/// nulls. Values must be JSON numbers: the passthrough path trusts the
/// caller's schema but still needs numeric cells to feed the classifier.
pub fn records_to_dataframe(rows: &[Record]) -> Result<DataFrame> {
    let mut order: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !order.iter().any(|k| k == key) {
                order.push(key.clone());
            }
        }
    }

    let mut columns = Vec::with_capacity(order.len());
    for name in &order {
        let mut values: Vec<Option<f64>> = Vec::with_capacity(rows.len());
        for row in rows {
            match row.get(name) {
                None | Some(Value::Null) => values.push(None),
                Some(value) => {
                    let number = value.as_f64().ok_or_else(|| {
                        ValidationError::MalformedInput(format!(
                            "non-numeric value for column '{}': {}",
                            name, value
                        ))
                    })?;
                    values.push(Some(number));
                }
            }
        }
        columns.push(Series::new(name.as_str().into(), values).into_column());
    }

    Ok(DataFrame::new(columns)?)
}

/// Convert a DataFrame into JSON row-objects, one per row.
///
/// Every cell is rendered as an f64; nulls are not expected here since
/// this runs on validated output.
pub fn dataframe_to_records(df: &DataFrame) -> Result<Vec<Record>> {
    let mut casted: Vec<(String, Vec<Option<f64>>)> = Vec::with_capacity(df.width());
    for col in df.get_columns() {
        let series = col
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        let values: Vec<Option<f64>> = series.f64()?.into_iter().collect();
        casted.push((col.name().to_string(), values));
    }

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let mut record = Record::new();
        for (name, values) in &casted {
            let cell = values[i].map(Value::from).unwrap_or(Value::Null);
            record.insert(name.clone(), cell);
        }
        records.push(record);
    }

    Ok(records)
}
