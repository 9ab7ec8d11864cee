/// Errors that can occur while reading or writing delimited tables
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// I/O error reading or writing a table file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV/TSV parsing or writing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Required column missing from the header
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Delimiter name other than tab, comma or space
    #[error("Unsupported delimiter: {0} (use tab, comma or space)")]
    UnsupportedDelimiter(String),

    /// Row has a different number of fields than the header
    #[error("Row {row} has {found} fields, expected {expected}")]
    RowWidth {
        /// 1-based data row number
        row: usize,
        /// Number of header columns
        expected: usize,
        /// Number of fields found
        found: usize,
    },
}
