//! The persisted registration record.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::field::RecordField;

/// One student registration as it is stored on disk.
///
/// Older deployments wrote the raw request body into the store, so records
/// may carry keys this struct does not know about, and known keys may hold
/// numbers or structured values instead of strings. This is the read view:
/// scalars are read as strings, anything else in a known key reads as empty,
/// and unknown keys are kept in [`extra`](Self::extra). The store itself
/// never rewrites existing entries through this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub vorname: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub nachname: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub schule: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub schulform: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub klasse: String,
    /// RFC 3339 creation time, kept as written.
    #[serde(default, deserialize_with = "lenient_string")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub ip: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl RegistrationRecord {
    /// Value of a known field. Absent values are empty.
    pub fn get(&self, field: RecordField) -> &str {
        match field {
            RecordField::Vorname => &self.vorname,
            RecordField::Nachname => &self.nachname,
            RecordField::Schule => &self.schule,
            RecordField::Schulform => &self.schulform,
            RecordField::Klasse => &self.klasse,
            RecordField::Timestamp => &self.timestamp,
            RecordField::Ip => self.ip.as_deref().unwrap_or(""),
        }
    }

    /// Value of a field addressed by its JSON key.
    ///
    /// Unknown keys fall back to [`extra`](Self::extra); anything that is not
    /// a scalar there reads as the empty string.
    pub fn value_by_name(&self, name: &str) -> Cow<'_, str> {
        match name.parse::<RecordField>() {
            Ok(field) => Cow::Borrowed(self.get(field)),
            Err(_) => self
                .extra
                .get(name)
                .and_then(scalar_to_string)
                .map(Cow::Owned)
                .unwrap_or(Cow::Borrowed("")),
        }
    }
}

/// String form of a JSON scalar; `None` for null, arrays and objects.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(&value).unwrap_or_default())
}

fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(&value))
}
