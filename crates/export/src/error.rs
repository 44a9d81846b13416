//! Error types for export operations.

use thiserror::Error;

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Error types for export operations.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Format is not supported.
    #[error("Unsupported export format: '{format}'")]
    UnsupportedFormat { format: String },

    /// Format is known but its exporter is not available in this deployment.
    #[error("Export format '{format}' is disabled")]
    FeatureUnavailable { format: String },

    /// Reading the record store failed.
    #[error("Storage error")]
    Storage(#[from] anmeldung_storage::StorageError),

    /// Writing delimited text failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Building the spreadsheet failed.
    #[error("Spreadsheet error: {message}")]
    Spreadsheet { message: String },
}

#[cfg(feature = "xlsx")]
impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(error: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::Spreadsheet {
            message: error.to_string(),
        }
    }
}
