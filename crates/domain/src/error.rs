//! Error types for registration intake.

use anmeldung_storage::StorageError;
use anmeldung_types::{InvalidSchoolType, RecordField};
use thiserror::Error;

/// Result type for intake operations.
pub type Result<T> = std::result::Result<T, IntakeError>;

/// Error types for registration intake.
#[derive(Error, Debug)]
pub enum IntakeError {
    /// The body is neither a JSON object nor form encoded.
    #[error("Invalid or empty body")]
    MalformedBody,

    /// A required field is absent or blank.
    #[error("Feld '{field}' fehlt")]
    MissingField { field: RecordField },

    #[error(transparent)]
    InvalidSchoolType(#[from] InvalidSchoolType),

    #[error("Failed to store registration")]
    Storage(#[from] StorageError),
}

impl IntakeError {
    /// Whether the submitter caused the error.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, IntakeError::Storage(_))
    }
}
