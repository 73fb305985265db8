//! Validation stages for the feature-preparation pipeline.
//!
//! Each stage takes the DataFrame by value, records healing actions in
//! the [`ValidationReport`](crate::report::ValidationReport), and either
//! returns the (possibly healed) table or a terminal error.

mod columns;
mod numeric;
mod rows;

pub use columns::ensure_required_columns;
pub use numeric::ensure_numeric_columns;
pub use rows::{deduplicate_rows, ensure_nonempty, fill_missing_values, reject_incomplete_rows};
