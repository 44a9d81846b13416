//! Anmeldung Export - tabular exports of the registration records
//!
//! This crate renders the record store as CSV or, with the `xlsx` feature,
//! as an Excel workbook. Records are sorted with German collation first.

pub mod collation;
pub mod error;
pub mod manager;
pub mod sort;
pub mod traits;
pub mod types;

pub mod formats;

// Re-export main types
pub use error::{ExportError, Result};
pub use manager::ExportManager;
pub use sort::sort_records;
pub use traits::Exporter;
pub use types::{ExportOutput, FormatInfo, SortOrder, SortSpec, Spreadsheet};

// Re-export exporters
pub use formats::CsvExporter;
#[cfg(feature = "xlsx")]
pub use formats::XlsxExporter;

/// Format id of the delimited text export.
pub const CSV_FORMAT: &str = "csv";
/// Format id of the spreadsheet export.
pub const SPREADSHEET_FORMAT: &str = "xlsx";

/// Create an export manager with the CSV exporter and, when requested and
/// compiled in, the spreadsheet exporter.
pub fn default_export_manager(spreadsheet: Spreadsheet) -> Result<ExportManager> {
    let mut manager = ExportManager::new();
    manager.register(CsvExporter::new())?;

    if spreadsheet == Spreadsheet::Enabled {
        #[cfg(feature = "xlsx")]
        manager.register(XlsxExporter::new())?;
        #[cfg(not(feature = "xlsx"))]
        tracing::warn!("Spreadsheet export requested but this build has no xlsx support");
    }

    Ok(manager)
}
