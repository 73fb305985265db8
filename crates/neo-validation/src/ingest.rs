//! CSV ingestion: raw text (or a file) into a DataFrame.
//!
//! Column names are trimmed of surrounding whitespace before any further
//! processing. No side effects.

use crate::error::{Result, ValidationError};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;

/// Parse UTF-8 CSV text into a DataFrame.
///
/// Fails with [`ValidationError::MalformedInput`] when the text is not
/// parseable tabular data.
pub fn read_csv_str(text: &str) -> Result<DataFrame> {
    let cursor = Cursor::new(text.to_string());

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .into_reader_with_file_handle(cursor)
        .finish()
        .map_err(|e| ValidationError::MalformedInput(e.to_string()))?;

    trim_column_names(&mut df)?;
    Ok(df)
}

/// Read a CSV file from disk. Used by the standalone CLI.
///
/// Rejects paths that do not end in `.csv` before touching the file.
pub fn read_csv_path(path: &Path) -> Result<DataFrame> {
    if path.extension().and_then(|e| e.to_str()) != Some("csv") {
        return Err(ValidationError::MalformedInput(format!(
            "invalid file type '{}': expected a .csv file",
            path.display()
        )));
    }

    let text = std::fs::read_to_string(path)?;
    read_csv_str(&text)
}

/// Normalize column names by trimming surrounding whitespace.
fn trim_column_names(df: &mut DataFrame) -> Result<()> {
    let trimmed: Vec<PlSmallStr> = df
        .get_column_names()
        .iter()
        .map(|name| name.as_str().trim().into())
        .collect();
    df.set_column_names(trimmed)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_str_basic() {
        let df = read_csv_str("a,b\n1,2\n3,4\n").unwrap();
        assert_eq!(df.shape(), (2, 2));
        assert_eq!(df.get_column_names()[0].as_str(), "a");
    }

    #[test]
    fn test_column_names_are_trimmed() {
        let df = read_csv_str("  a , b \n1,2\n").unwrap();
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_header_only_parses_to_zero_rows() {
        let df = read_csv_str("a,b\n").unwrap();
        assert_eq!(df.height(), 0);
    }

    #[test]
    fn test_garbage_is_malformed_input() {
        // A completely empty body has no header to parse.
        let err = read_csv_str("").unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_INPUT");
    }

    #[test]
    fn test_non_csv_extension_rejected() {
        let err = read_csv_path(Path::new("data.txt")).unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_INPUT");
        assert!(err.to_string().contains("data.txt"));
    }
}
