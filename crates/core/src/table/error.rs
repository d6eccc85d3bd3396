//! Table source error types.

use thiserror::Error;

/// Errors that can occur while building or reading a table source.
#[derive(Debug, Error)]
pub enum TableError {
    /// The source could not be read.
    #[error("Failed to read table source: {0}")]
    Io(#[from] std::io::Error),

    /// The source is not valid JSON.
    #[error("Malformed table JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level JSON value is not an object of columns.
    #[error("Table source must be a JSON object mapping field names to arrays")]
    NotAnObject,

    /// A field's value is not an array.
    #[error("Field '{0}' is not an array of cells")]
    NotAColumn(String),

    /// A column's length differs from the table's row count.
    #[error("Column '{column}' has {found} rows, expected {expected}")]
    RaggedColumn {
        /// Column name.
        column: String,
        /// Row count established by earlier columns.
        expected: usize,
        /// Row count of this column.
        found: usize,
    },
}
