//! End-to-end intake behavior against a real filesystem store.

use std::sync::Arc;

use anmeldung_domain::{IntakeError, IntakeValidator, RegistrationService, parse_body};
use anmeldung_storage::{FilesystemStore, RecordStore};
use serde_json::json;
use tempfile::TempDir;

const REQUIRED: [&str; 5] = ["vorname", "nachname", "schule", "schulform", "klasse"];

fn setup() -> (TempDir, Arc<FilesystemStore>, RegistrationService) {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(FilesystemStore::new(
        temp_dir.path().join("data/registrations.json"),
    ));
    let service = RegistrationService::new(store.clone(), IntakeValidator::new());
    (temp_dir, store, service)
}

fn valid_body() -> serde_json::Value {
    json!({
        "vorname": "Anna",
        "nachname": "Bert",
        "schule": "BG Musterstadt",
        "schulform": "GYM",
        "klasse": "1a"
    })
}

async fn submit_json(
    service: &RegistrationService,
    body: &serde_json::Value,
) -> Result<(), IntakeError> {
    let raw = serde_json::to_vec(body).unwrap();
    service
        .submit(parse_body(Some("application/json"), &raw), None)
        .await
        .map(|_| ())
}

#[tokio::test]
async fn test_each_valid_submission_adds_exactly_one_record() {
    let (_dir, store, service) = setup();

    for (n, vorname) in ["Anna", "  Bob", "Carla  "].iter().enumerate() {
        let mut body = valid_body();
        body["vorname"] = json!(vorname);
        submit_json(&service, &body).await.unwrap();

        let records = store.load_all().await.unwrap();
        assert_eq!(records.len(), n + 1);
        assert_eq!(records.last().unwrap().vorname, vorname.trim());
    }
}

#[tokio::test]
async fn test_any_missing_or_blank_field_is_rejected() {
    let (_dir, store, service) = setup();
    submit_json(&service, &valid_body()).await.unwrap();

    for field in REQUIRED {
        for replacement in [None, Some(""), Some("   ")] {
            let mut body = valid_body();
            match replacement {
                None => {
                    body.as_object_mut().unwrap().remove(field);
                }
                Some(blank) => body[field] = json!(blank),
            }

            let err = submit_json(&service, &body).await.unwrap_err();
            match err {
                IntakeError::MissingField { field: reported } => {
                    assert_eq!(reported.as_str(), field)
                }
                other => panic!("unexpected error for {field}: {other:?}"),
            }
        }
    }

    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_long_value_is_stored_truncated() {
    let (_dir, store, service) = setup();

    let mut body = valid_body();
    body["schule"] = json!("x".repeat(250));
    submit_json(&service, &body).await.unwrap();

    let records = store.load_all().await.unwrap();
    assert_eq!(records[0].schule, "x".repeat(200));
}
