//! Backend implementations for the record store.

pub mod filesystem;

// Re-export the main filesystem backend for convenience
pub use filesystem::FilesystemStore;
