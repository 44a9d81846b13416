//! Required-field and formatting rules for submissions.

use anmeldung_types::{RecordField, SchoolType};

use crate::body::Submission;
use crate::error::{IntakeError, Result};

/// Longest accepted field value, in characters.
pub const MAX_FIELD_CHARS: usize = 200;

/// A submission that passed validation, with every value trimmed and capped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedRegistration {
    pub vorname: String,
    pub nachname: String,
    pub schule: String,
    pub schulform: String,
    pub klasse: String,
}

/// Checks submissions against the registration rules.
#[derive(Debug, Clone)]
pub struct IntakeValidator {
    enforce_school_type: bool,
}

impl IntakeValidator {
    /// Validator that also rejects school types other than GYM and NMS.
    pub fn new() -> Self {
        Self {
            enforce_school_type: true,
        }
    }

    /// Validator that accepts any non-empty school type, as the form-only
    /// check of earlier deployments did.
    pub fn lenient() -> Self {
        Self {
            enforce_school_type: false,
        }
    }

    pub fn with_school_type_check(mut self, enforce: bool) -> Self {
        self.enforce_school_type = enforce;
        self
    }

    /// Validate a submission.
    ///
    /// Fields are checked in [`RecordField::REQUIRED`] order and the first
    /// absent or blank one is reported.
    pub fn validate(&self, submission: &Submission) -> Result<CleanedRegistration> {
        let required = |field: RecordField| match submission.get(field.as_str()) {
            Some(value) if !value.trim().is_empty() => Ok(clean_value(value)),
            _ => Err(IntakeError::MissingField { field }),
        };

        // Initializers run in source order, which must match REQUIRED.
        let cleaned = CleanedRegistration {
            vorname: required(RecordField::Vorname)?,
            nachname: required(RecordField::Nachname)?,
            schule: required(RecordField::Schule)?,
            schulform: required(RecordField::Schulform)?,
            klasse: required(RecordField::Klasse)?,
        };

        if self.enforce_school_type {
            cleaned.schulform.parse::<SchoolType>()?;
        }

        Ok(cleaned)
    }
}

impl Default for IntakeValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Trim and truncate to [`MAX_FIELD_CHARS`] characters.
pub fn clean_value(value: &str) -> String {
    value.trim().chars().take(MAX_FIELD_CHARS).collect()
}
