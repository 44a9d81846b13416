//! Core trait for export functionality.

use anmeldung_storage::RegistrationRecord;

use crate::error::Result;
use crate::types::FormatInfo;

/// Renders an already sorted sequence of records into one file format.
///
/// Rendering is a pure transformation; exporters never touch the store.
pub trait Exporter: Send + Sync {
    /// Get format information.
    fn format_info(&self) -> FormatInfo;

    /// Render the records in the given order.
    fn render(&self, records: &[RegistrationRecord]) -> Result<Vec<u8>>;
}
