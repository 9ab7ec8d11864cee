use crate::plate::PlateError;
use crate::table::TableError;

/// Errors that can occur while exporting transfer or lookup files
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Reading the input table failed
    #[error("Table error: {0}")]
    TableError(#[from] TableError),

    /// I/O error writing an output file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV error writing an output file
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Transfer volume is zero, negative or not a number
    #[error("Transfer volume must be a positive number, got {0}")]
    InvalidVolume(f64),

    /// Well field that is not a well name
    #[error("Row {row}, column '{column}': {source}")]
    InvalidWell {
        /// 1-based data row number
        row: usize,
        /// Column holding the well
        column: String,
        /// Parse failure
        #[source]
        source: PlateError,
    },

    /// Required field left empty
    #[error("Row {row}: column '{column}' is empty")]
    EmptyField {
        /// 1-based data row number
        row: usize,
        /// Column name
        column: String,
    },

    /// Field that would escape the output directory when used in a file name
    #[error("Row {row}, column '{column}': '{value}' cannot be used in a file name")]
    UnsafeFileName {
        /// 1-based data row number
        row: usize,
        /// Column name
        column: String,
        /// Offending value
        value: String,
    },
}
