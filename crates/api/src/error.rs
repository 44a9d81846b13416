//! HTTP error responses.

use anmeldung_domain::IntakeError;
use anmeldung_export::ExportError;
use anmeldung_storage::StorageError;
use axum::Json;
use axum::http::header::{ALLOW, WWW_AUTHENTICATE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::auth::CHALLENGE;

/// Generic message for failures the caller cannot fix.
pub const SERVER_ERROR_MESSAGE: &str = "Unerwarteter Serverfehler";

/// Methods accepted on the intake routes.
pub const INTAKE_METHODS: &str = "POST, OPTIONS";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Unauthorized")]
    Unauthorized,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    ok: bool,
    code: &'a str,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'a str>,
}

impl<'a> ErrorBody<'a> {
    fn new(code: &'a str, error: impl Into<String>) -> Self {
        Self {
            ok: false,
            code,
            error: error.into(),
            field: None,
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Intake(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Export(ExportError::FeatureUnavailable { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Export(ExportError::UnsupportedFormat { .. }) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Intake(_) | ApiError::Export(_) | ApiError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn body(&self) -> ErrorBody<'_> {
        match self {
            ApiError::Intake(err @ IntakeError::MalformedBody) => {
                ErrorBody::new("malformed_body", err.to_string())
            }
            ApiError::Intake(err @ IntakeError::MissingField { field }) => ErrorBody {
                field: Some(field.as_str()),
                ..ErrorBody::new("missing_field", err.to_string())
            },
            ApiError::Intake(err @ IntakeError::InvalidSchoolType(_)) => {
                ErrorBody::new("invalid_school_type", err.to_string())
            }
            ApiError::Export(err @ ExportError::FeatureUnavailable { .. }) => {
                ErrorBody::new("feature_unavailable", err.to_string())
            }
            ApiError::Export(err @ ExportError::UnsupportedFormat { .. }) => {
                ErrorBody::new("unsupported_format", err.to_string())
            }
            ApiError::MethodNotAllowed => ErrorBody::new("method_not_allowed", self.to_string()),
            _ => ErrorBody::new("server_error", SERVER_ERROR_MESSAGE),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
            let report = eyre::Report::new(self);
            error!(error = ?report, "Request failed");
            return (
                status,
                Json(ErrorBody::new("server_error", SERVER_ERROR_MESSAGE)),
            )
                .into_response();
        }

        match self {
            ApiError::Unauthorized => {
                let mut response = (status, "Unauthorized").into_response();
                response
                    .headers_mut()
                    .insert(WWW_AUTHENTICATE, HeaderValue::from_static(CHALLENGE));
                response
            }
            ApiError::MethodNotAllowed => {
                let mut response = (status, Json(self.body())).into_response();
                response
                    .headers_mut()
                    .insert(ALLOW, HeaderValue::from_static(INTAKE_METHODS));
                response
            }
            _ => (status, Json(self.body())).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anmeldung_types::RecordField;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_field_body() {
        let response = ApiError::from(IntakeError::MissingField {
            field: RecordField::Schule,
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["ok"], false);
        assert_eq!(json["code"], "missing_field");
        assert_eq!(json["field"], "schule");
        assert_eq!(json["error"], "Feld 'schule' fehlt");
    }

    #[tokio::test]
    async fn test_storage_failure_is_generic() {
        let response = ApiError::from(StorageError::Task {
            source: tokio::task::spawn_blocking(|| panic!("boom"))
                .await
                .unwrap_err(),
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["code"], "server_error");
        assert_eq!(json["error"], SERVER_ERROR_MESSAGE);
        assert!(json.get("field").is_none());
    }

    #[tokio::test]
    async fn test_feature_unavailable() {
        let response = ApiError::from(ExportError::FeatureUnavailable {
            format: "xlsx".to_string(),
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(response).await["code"], "feature_unavailable");
    }

    #[test]
    fn test_unauthorized_challenge() {
        let response = ApiError::Unauthorized.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers()[WWW_AUTHENTICATE],
            "Basic realm=\"Admin Bereich\""
        );
    }
}
