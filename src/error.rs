//! Error types for the tabular analytics library.
//!
//! This module provides the error handling strategy using `thiserror` for
//! automatic error trait implementations. All errors surfaced by the public
//! API are represented by the `AnalyticsError` enum.

use thiserror::Error;

use crate::analyzers::AnalyzerError;

/// The main error type for the tabular analytics library.
///
/// Every failure is local and recoverable by the caller: a parse failure
/// leaves any previously installed table untouched, and no error terminates
/// the process.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// The raw text yielded zero parseable lines.
    #[error("empty input: no parseable lines")]
    EmptyInput,

    /// Error from I/O operations while reading raw content.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from DataFusion operations.
    #[error("DataFusion error: {0}")]
    DataFusion(#[from] datafusion::error::DataFusionError),

    /// Error from Arrow operations.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error from an analyzer while computing a derived view.
    #[error("analyzer error: {0}")]
    Analyzer(#[from] AnalyzerError),

    /// A column index does not exist in the table.
    #[error("column index {index} out of bounds for table with {count} columns")]
    ColumnNotFound { index: usize, count: usize },
}

/// A type alias for `Result<T, AnalyticsError>`.
///
/// This is the standard `Result` type used throughout the library.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

impl AnalyticsError {
    /// Creates a column-not-found error for the given index.
    pub fn column_not_found(index: usize, count: usize) -> Self {
        Self::ColumnNotFound { index, count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_message() {
        let err = AnalyticsError::EmptyInput;
        assert_eq!(err.to_string(), "empty input: no parseable lines");
    }

    #[test]
    fn test_column_not_found_message() {
        let err = AnalyticsError::column_not_found(4, 3);
        assert_eq!(
            err.to_string(),
            "column index 4 out of bounds for table with 3 columns"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        let err: AnalyticsError = io.into();
        assert!(matches!(err, AnalyticsError::Io(_)));
    }
}
