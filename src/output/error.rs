/// Errors that can occur while writing a result table
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// I/O error writing the output file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Arrow error building the record batch
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Parquet error writing the file
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),
}
