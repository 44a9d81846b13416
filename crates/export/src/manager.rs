//! Export manager for coordinating CSV and spreadsheet exports.

use std::collections::HashMap;

use anmeldung_storage::RecordStore;
use tracing::debug;

use crate::error::{ExportError, Result};
use crate::sort::sort_records;
use crate::traits::Exporter;
use crate::types::{ExportOutput, SortSpec};
use crate::{CSV_FORMAT, SPREADSHEET_FORMAT};

/// Formats this crate knows how to produce, whether or not they are registered.
const KNOWN_FORMATS: [&str; 2] = [CSV_FORMAT, SPREADSHEET_FORMAT];

/// Manager for export operations.
pub struct ExportManager {
    exporters: HashMap<String, Box<dyn Exporter>>,
}

impl ExportManager {
    /// Create new export manager.
    pub fn new() -> Self {
        Self {
            exporters: HashMap::new(),
        }
    }

    /// Register an exporter.
    pub fn register<E: Exporter + 'static>(&mut self, exporter: E) -> Result<()> {
        let format_id = exporter.format_info().id;

        if self.exporters.contains_key(&format_id) {
            return Err(ExportError::InvalidConfiguration {
                message: format!("Exporter for format '{}' already registered", format_id),
            });
        }

        self.exporters.insert(format_id, Box::new(exporter));
        Ok(())
    }

    /// Read the whole store, sort it and render it in the given format.
    pub async fn export(
        &self,
        format: &str,
        store: &dyn RecordStore,
        sort: &SortSpec,
    ) -> Result<ExportOutput> {
        let exporter = self.exporter(format)?;

        let mut records = store.load_all().await?;
        sort_records(&mut records, sort);

        let data = exporter.render(&records)?;
        let info = exporter.format_info();
        debug!(
            format = %info.id,
            records = records.len(),
            bytes = data.len(),
            sort = %sort.field,
            order = %sort.order,
            "Rendered export"
        );

        Ok(ExportOutput {
            data,
            filename: info.filename(),
            mime_type: info.mime_type,
            records: records.len(),
        })
    }

    fn exporter(&self, format: &str) -> Result<&dyn Exporter> {
        match self.exporters.get(format) {
            Some(exporter) => Ok(exporter.as_ref()),
            None if KNOWN_FORMATS.contains(&format) => Err(ExportError::FeatureUnavailable {
                format: format.to_string(),
            }),
            None => Err(ExportError::UnsupportedFormat {
                format: format.to_string(),
            }),
        }
    }
}

impl Default for ExportManager {
    fn default() -> Self {
        Self::new()
    }
}
