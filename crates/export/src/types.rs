//! Core types for export operations.

use std::fmt;

use anmeldung_types::RecordField;

/// Information about an export format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatInfo {
    /// Unique identifier (e.g., "csv").
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// MIME type for HTTP responses.
    pub mime_type: String,
    /// File extension used in download names.
    pub extension: String,
}

impl FormatInfo {
    /// Create new format info.
    pub fn new(id: &str, name: &str, mime_type: &str, extension: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            extension: extension.to_string(),
        }
    }

    /// Suggested download file name.
    pub fn filename(&self) -> String {
        format!("registrations.{}", self.extension)
    }
}

/// Whether the spreadsheet exporter should be offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spreadsheet {
    Enabled,
    Disabled,
}

impl From<bool> for Spreadsheet {
    fn from(enabled: bool) -> Self {
        if enabled {
            Spreadsheet::Enabled
        } else {
            Spreadsheet::Disabled
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Read the `order` query parameter. Anything but `desc` is ascending.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("desc") => SortOrder::Descending,
            _ => SortOrder::Ascending,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => f.write_str("asc"),
            SortOrder::Descending => f.write_str("desc"),
        }
    }
}

/// Field and direction to sort exported records by.
///
/// The field is a record key name. Names that match no persisted key are
/// allowed and compare as empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    /// Build from the `sort` and `order` query parameters.
    pub fn from_params(sort: Option<&str>, order: Option<&str>) -> Self {
        match sort.filter(|s| !s.is_empty()) {
            Some(field) => Self::new(field, SortOrder::from_param(order)),
            None => Self {
                order: SortOrder::from_param(order),
                ..Self::default()
            },
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new(RecordField::Nachname.as_str(), SortOrder::Ascending)
    }
}

/// A rendered export ready to be sent to a client.
#[derive(Debug, Clone)]
pub struct ExportOutput {
    pub data: Vec<u8>,
    pub mime_type: String,
    pub filename: String,
    /// Number of records rendered.
    pub records: usize,
}
