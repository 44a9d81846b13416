//! Request body decoding.
//!
//! The registration form posts JSON, while plain HTML forms and older clients
//! post `application/x-www-form-urlencoded`. Both decode to a [`Submission`].

use std::collections::HashMap;

use anmeldung_types::scalar_to_string;
use serde_json::{Map, Value};

use crate::error::{IntakeError, Result};

/// Outcome of decoding a request body.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedBody {
    Json(Map<String, Value>),
    Form(HashMap<String, String>),
    Unparseable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclaredKind {
    Json,
    Form,
    Unknown,
}

impl DeclaredKind {
    fn from_content_type(content_type: Option<&str>) -> Self {
        let Some(content_type) = content_type else {
            return DeclaredKind::Unknown;
        };
        let content_type = content_type.to_ascii_lowercase();

        if content_type.contains("application/json") {
            DeclaredKind::Json
        } else if content_type.contains("application/x-www-form-urlencoded") {
            DeclaredKind::Form
        } else {
            DeclaredKind::Unknown
        }
    }
}

/// Decode a request body according to its declared content type.
///
/// Without a recognised content type the body is tried as a JSON object
/// first and as form encoding second. Empty bodies are never parseable.
pub fn parse_body(content_type: Option<&str>, raw: &[u8]) -> ParsedBody {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return ParsedBody::Unparseable;
    }

    let parsed = match DeclaredKind::from_content_type(content_type) {
        DeclaredKind::Json => parse_json(raw),
        DeclaredKind::Form => parse_form(raw),
        DeclaredKind::Unknown => parse_json(raw).or_else(|| parse_form(raw)),
    };

    parsed.unwrap_or(ParsedBody::Unparseable)
}

fn parse_json(raw: &[u8]) -> Option<ParsedBody> {
    match serde_json::from_slice::<Value>(raw).ok()? {
        Value::Object(map) => Some(ParsedBody::Json(map)),
        _ => None,
    }
}

fn parse_form(raw: &[u8]) -> Option<ParsedBody> {
    std::str::from_utf8(raw).ok()?;

    let fields = url::form_urlencoded::parse(raw)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    Some(ParsedBody::Form(fields))
}

/// Field values of a decoded submission, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    fields: HashMap<String, String>,
}

impl Submission {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// Raw, untrimmed value of a field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

impl TryFrom<ParsedBody> for Submission {
    type Error = IntakeError;

    fn try_from(body: ParsedBody) -> Result<Self> {
        match body {
            // null, arrays and objects count as absent
            ParsedBody::Json(map) => Ok(Submission::new(
                map.iter()
                    .filter_map(|(key, value)| Some((key.clone(), scalar_to_string(value)?)))
                    .collect(),
            )),
            ParsedBody::Form(fields) => Ok(Submission::new(fields)),
            ParsedBody::Unparseable => Err(IntakeError::MalformedBody),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: Option<&str> = Some("application/json; charset=utf-8");
    const FORM: Option<&str> = Some("application/x-www-form-urlencoded");

    #[test]
    fn test_json_body() {
        let body = parse_body(JSON, br#"{"vorname": "Anna", "klasse": 3}"#);
        let submission = Submission::try_from(body).unwrap();

        assert_eq!(submission.get("vorname"), Some("Anna"));
        assert_eq!(submission.get("klasse"), Some("3"));
    }

    #[test]
    fn test_declared_json_must_be_an_object() {
        assert_eq!(parse_body(JSON, b"[1, 2]"), ParsedBody::Unparseable);
        assert_eq!(parse_body(JSON, b"vorname=Anna"), ParsedBody::Unparseable);
    }

    #[test]
    fn test_form_body() {
        let body = parse_body(FORM, b"vorname=J%C3%BCrgen&schule=BG+Nord&vorname=Anna");
        let submission = Submission::try_from(body).unwrap();

        // last occurrence wins
        assert_eq!(submission.get("vorname"), Some("Anna"));
        assert_eq!(submission.get("schule"), Some("BG Nord"));
    }

    #[test]
    fn test_undeclared_body_falls_back_to_form() {
        assert!(matches!(
            parse_body(None, br#"{"vorname": "Anna"}"#),
            ParsedBody::Json(_)
        ));
        assert!(matches!(
            parse_body(Some("text/plain"), b"vorname=Anna"),
            ParsedBody::Form(_)
        ));
    }

    #[test]
    fn test_empty_and_binary_bodies_are_unparseable() {
        assert_eq!(parse_body(JSON, b""), ParsedBody::Unparseable);
        assert_eq!(parse_body(FORM, b"  \r\n"), ParsedBody::Unparseable);
        assert_eq!(parse_body(None, &[0xff, 0xfe, 0x00]), ParsedBody::Unparseable);

        let err = Submission::try_from(ParsedBody::Unparseable).unwrap_err();
        assert!(matches!(err, IntakeError::MalformedBody));
    }

    #[test]
    fn test_non_scalar_json_values_are_absent() {
        let body = parse_body(JSON, br#"{"vorname": null, "schule": ["a"], "klasse": true}"#);
        let submission = Submission::try_from(body).unwrap();

        assert_eq!(submission.get("vorname"), None);
        assert_eq!(submission.get("schule"), None);
        assert_eq!(submission.get("klasse"), Some("true"));
    }
}
