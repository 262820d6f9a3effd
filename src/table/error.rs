/// Errors that can occur while reading an input table
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// I/O error reading the table file
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV/TSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// SQLite error reading a target database
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),

    /// A required column is absent from the header
    #[error("Missing required column '{column}' in {table}")]
    MissingColumn {
        /// Table source label
        table: String,
        /// Name of the missing column
        column: String,
    },

    /// A cell could not be converted to the column's type
    #[error("Invalid value '{value}' in {table}, row {row}, column '{column}': {reason}")]
    InvalidValue {
        /// Table source label
        table: String,
        /// 1-based data row (the header is not counted)
        row: usize,
        /// Column name
        column: String,
        /// Raw cell content
        value: String,
        /// Why the value was rejected
        reason: String,
    },
}
