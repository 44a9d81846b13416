//! Request handlers.

use std::net::SocketAddr;

use anmeldung_domain::{IntakeError, parse_body};
use anmeldung_export::{CSV_FORMAT, ExportOutput, SPREADSHEET_FORMAT, SortSpec};
use anmeldung_storage::RegistrationRecord;
use axum::Json;
use axum::extract::connect_info::ConnectInfo;
use axum::extract::{Query, Request, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::state::SharedState;

/// Largest accepted submission body.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    pub sort: Option<String>,
    pub order: Option<String>,
}

impl ExportQuery {
    fn sort_spec(&self) -> SortSpec {
        SortSpec::from_params(self.sort.as_deref(), self.order.as_deref())
    }
}

/// `POST /register` and `POST /api/save_registration`.
pub async fn submit(
    State(state): State<SharedState>,
    request: Request,
) -> Result<Json<Value>, ApiError> {
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let raw = axum::body::to_bytes(request.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|_| IntakeError::MalformedBody)?;

    let body = parse_body(content_type.as_deref(), &raw);
    state.registrations.submit(body, remote_addr).await?;

    Ok(Json(json!({ "ok": true })))
}

/// OPTIONS requests are answered by the CORS layer with an empty body;
/// report them as `204 No Content`.
pub async fn preflight_no_content(request: Request, next: Next) -> Response {
    let is_preflight = request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;
    if is_preflight && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// `GET /registrations.json`: the whole store in insertion order.
pub async fn list(
    State(state): State<SharedState>,
) -> Result<Json<Vec<RegistrationRecord>>, ApiError> {
    Ok(Json(state.store.load_all().await?))
}

pub async fn export_csv(
    State(state): State<SharedState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    export(&state, CSV_FORMAT, &query).await
}

pub async fn export_xlsx(
    State(state): State<SharedState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    export(&state, SPREADSHEET_FORMAT, &query).await
}

async fn export(
    state: &SharedState,
    format: &str,
    query: &ExportQuery,
) -> Result<Response, ApiError> {
    let output = state
        .exports
        .export(format, state.store.as_ref(), &query.sort_spec())
        .await?;
    Ok(attachment(output))
}

fn attachment(output: ExportOutput) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", output.filename);

    let mut response = output.data.into_response();
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&output.mime_type) {
        headers.insert(CONTENT_TYPE, value);
    }
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(CONTENT_DISPOSITION, value);
    }
    response
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
