//! Export format implementations.

pub mod csv;
#[cfg(feature = "xlsx")]
pub mod xlsx;

// Re-export exporters
pub use self::csv::CsvExporter;
#[cfg(feature = "xlsx")]
pub use self::xlsx::XlsxExporter;
