//! Registration service: stamps validated submissions and stores them.

use std::collections::BTreeMap;
use std::net::IpAddr;
use std::sync::Arc;

use anmeldung_storage::{RecordStore, RegistrationRecord};
use chrono::{Local, SecondsFormat};
use tracing::info;

use crate::body::{ParsedBody, Submission};
use crate::error::Result;
use crate::validator::{CleanedRegistration, IntakeValidator};

/// Accepts registrations and appends them to the record store.
#[derive(Clone)]
pub struct RegistrationService {
    store: Arc<dyn RecordStore>,
    validator: IntakeValidator,
}

impl RegistrationService {
    pub fn new(store: Arc<dyn RecordStore>, validator: IntakeValidator) -> Self {
        Self { store, validator }
    }

    /// Validate a decoded body and register it.
    pub async fn submit(
        &self,
        body: ParsedBody,
        remote_addr: Option<IpAddr>,
    ) -> Result<RegistrationRecord> {
        let submission = Submission::try_from(body)?;
        let cleaned = self.validator.validate(&submission)?;
        self.register(cleaned, remote_addr).await
    }

    /// Stamp a validated registration with the current time and the caller's
    /// address and append it to the store.
    pub async fn register(
        &self,
        cleaned: CleanedRegistration,
        remote_addr: Option<IpAddr>,
    ) -> Result<RegistrationRecord> {
        let record = RegistrationRecord {
            vorname: cleaned.vorname,
            nachname: cleaned.nachname,
            schule: cleaned.schule,
            schulform: cleaned.schulform,
            klasse: cleaned.klasse,
            timestamp: current_timestamp(),
            ip: remote_addr.map(|addr| addr.to_string()),
            extra: BTreeMap::new(),
        };

        let position = self.store.append(record.clone()).await?;
        info!(
            position,
            schulform = %record.schulform,
            "Registration saved"
        );

        Ok(record)
    }
}

/// Local time as RFC 3339 with a numeric offset, e.g. `2025-03-01T09:15:00+01:00`.
fn current_timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}
