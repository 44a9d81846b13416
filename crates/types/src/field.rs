//! Names of the persisted record keys.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A key of the persisted registration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Vorname,
    Nachname,
    Schule,
    Schulform,
    Klasse,
    Timestamp,
    Ip,
}

/// Returned when a name does not match any persisted key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown record field: '{0}'")]
pub struct UnknownField(pub String);

impl RecordField {
    /// Fields a submission must carry, in the order they are checked.
    pub const REQUIRED: [RecordField; 5] = [
        RecordField::Vorname,
        RecordField::Nachname,
        RecordField::Schule,
        RecordField::Schulform,
        RecordField::Klasse,
    ];

    /// Columns written by the tabular exports, in output order.
    pub const EXPORT_COLUMNS: [RecordField; 6] = [
        RecordField::Vorname,
        RecordField::Nachname,
        RecordField::Schule,
        RecordField::Schulform,
        RecordField::Klasse,
        RecordField::Timestamp,
    ];

    /// JSON key used in the record store.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::Vorname => "vorname",
            RecordField::Nachname => "nachname",
            RecordField::Schule => "schule",
            RecordField::Schulform => "schulform",
            RecordField::Klasse => "klasse",
            RecordField::Timestamp => "timestamp",
            RecordField::Ip => "ip",
        }
    }

    /// Column header shown in exports.
    pub fn label(&self) -> &'static str {
        match self {
            RecordField::Vorname => "Vorname",
            RecordField::Nachname => "Nachname",
            RecordField::Schule => "Schule",
            RecordField::Schulform => "Schulform",
            RecordField::Klasse => "Klasse",
            RecordField::Timestamp => "Timestamp",
            RecordField::Ip => "IP",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vorname" => Ok(RecordField::Vorname),
            "nachname" => Ok(RecordField::Nachname),
            "schule" => Ok(RecordField::Schule),
            "schulform" => Ok(RecordField::Schulform),
            "klasse" => Ok(RecordField::Klasse),
            "timestamp" => Ok(RecordField::Timestamp),
            "ip" => Ok(RecordField::Ip),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_fields() {
        for field in RecordField::EXPORT_COLUMNS {
            assert_eq!(field.as_str().parse::<RecordField>().unwrap(), field);
        }
        assert_eq!("ip".parse::<RecordField>().unwrap(), RecordField::Ip);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let err = "Nachname".parse::<RecordField>().unwrap_err();
        assert_eq!(err, UnknownField("Nachname".to_string()));
    }
}
