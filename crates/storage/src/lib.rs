//! Record storage for the Anmeldung registration service.
//!
//! This crate provides a trait-based store for registration records. The only
//! backend keeps the whole collection as a single JSON array on disk and
//! serializes writers with an OS file lock.

pub mod backends;
pub mod error;
pub mod traits;

// Re-export the main interface and types for easy access
pub use anmeldung_types::RegistrationRecord;
pub use backends::FilesystemStore;
pub use error::{Result, StorageError};
pub use traits::RecordStore;
