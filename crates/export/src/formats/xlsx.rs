//! Excel workbook export format implementation.

use anmeldung_storage::RegistrationRecord;
use anmeldung_types::RecordField;
use rust_xlsxwriter::{Format, Workbook};

use crate::error::Result;
use crate::traits::Exporter;
use crate::types::FormatInfo;

const SHEET_NAME: &str = "Registrierungen";

/// Column widths in character units, matching `RecordField::EXPORT_COLUMNS`.
const COLUMN_WIDTHS: [f64; 6] = [20.0, 20.0, 30.0, 10.0, 10.0, 25.0];

/// XLSX format exporter.
pub struct XlsxExporter;

impl XlsxExporter {
    /// Create new XLSX exporter.
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for XlsxExporter {
    fn format_info(&self) -> FormatInfo {
        FormatInfo::new(
            "xlsx",
            "Excel Workbook",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            "xlsx",
        )
    }

    fn render(&self, records: &[RegistrationRecord]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();

        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for (col, (field, width)) in RecordField::EXPORT_COLUMNS
            .iter()
            .zip(COLUMN_WIDTHS)
            .enumerate()
        {
            let col = col as u16;
            sheet.set_column_width(col, width)?;
            sheet.write_string_with_format(0, col, field.label(), &header)?;
        }
        sheet.set_freeze_panes(1, 0)?;

        for (index, record) in records.iter().enumerate() {
            // Past u32::MAX the writer reports the row limit error.
            let row = u32::try_from(index + 1).unwrap_or(u32::MAX);
            for (col, &field) in RecordField::EXPORT_COLUMNS.iter().enumerate() {
                sheet.write_string(row, col as u16, record.get(field))?;
            }
        }

        Ok(workbook.save_to_buffer()?)
    }
}

impl Default for XlsxExporter {
    fn default() -> Self {
        Self::new()
    }
}
