//! CSV export format implementation.

use anmeldung_storage::RegistrationRecord;
use anmeldung_types::RecordField;
use csv::{Terminator, WriterBuilder};

use crate::error::Result;
use crate::traits::Exporter;
use crate::types::FormatInfo;

/// Byte-order mark so spreadsheet tools detect UTF-8.
const UTF8_BOM: &[u8] = "\u{feff}".as_bytes();

/// CSV format exporter.
///
/// Comma separated, CRLF line endings, BOM prefixed. Fields are quoted only
/// when they contain a comma, a quote or a line break.
pub struct CsvExporter;

impl CsvExporter {
    /// Create new CSV exporter.
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for CsvExporter {
    fn format_info(&self) -> FormatInfo {
        FormatInfo::new("csv", "CSV (UTF-8)", "text/csv; charset=utf-8", "csv")
    }

    fn render(&self, records: &[RegistrationRecord]) -> Result<Vec<u8>> {
        let mut buffer = UTF8_BOM.to_vec();

        {
            let mut writer = WriterBuilder::new()
                .terminator(Terminator::CRLF)
                .from_writer(&mut buffer);

            writer.write_record(RecordField::EXPORT_COLUMNS.iter().map(|f| f.label()))?;
            for record in records {
                writer.write_record(
                    RecordField::EXPORT_COLUMNS
                        .iter()
                        .map(|&field| record.get(field)),
                )?;
            }
            writer.flush()?;
        }

        Ok(buffer)
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}
