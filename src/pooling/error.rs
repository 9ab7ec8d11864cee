use crate::table::TableError;

/// Errors that can occur during pooling
#[derive(Debug, thiserror::Error)]
pub enum PoolingError {
    /// Well count, capacity or threshold are inconsistent with the input
    #[error("Configuration error: {0}")]
    Config(String),

    /// A compound has no usable exact mass
    #[error("Row {row} (sample '{sample}'): missing or invalid exact mass '{value}'")]
    MissingMass {
        /// 1-based data row number
        row: usize,
        /// Sample identifier of the row
        sample: String,
        /// Raw field value
        value: String,
    },

    /// Reading or writing a table failed
    #[error("Table error: {0}")]
    TableError(#[from] TableError),

    /// I/O error writing diagnostics
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV error writing diagnostics
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// JSON serialization error writing the run summary
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}
