//! Anmeldung API - HTTP front of the registration service
//!
//! Public intake routes accept registrations; the admin routes behind
//! HTTP Basic auth list and export the stored records.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

use axum::Router;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::middleware;
use axum::routing::{MethodRouter, get, post};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info_span;
use uuid::Uuid;

pub use config::AppConfig;
pub use error::ApiError;
pub use state::{AppState, SharedState};

fn intake_route() -> MethodRouter<SharedState> {
    post(handlers::submit).fallback(handlers::method_not_allowed)
}

/// Build the application router.
pub fn router(state: SharedState) -> Router {
    let mut admin = Router::new()
        .route("/registrations.json", get(handlers::list))
        .route("/export.csv", get(handlers::export_csv))
        .route("/export.xlsx", get(handlers::export_xlsx));
    if let Some(dir) = &state.static_dir {
        admin = admin.route_service("/admin", ServeFile::new(dir.join("admin.html")));
    }
    let admin = admin.route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::require_admin,
    ));

    let mut app = Router::new()
        .route("/register", intake_route())
        .route("/api/save_registration", intake_route())
        .route("/health", get(handlers::health))
        .merge(admin);
    if let Some(dir) = &state.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        info_span!(
            "request",
            id = %Uuid::new_v4(),
            method = %request.method(),
            uri = %request.uri(),
        )
    });

    app.layer(cors)
        .layer(middleware::from_fn(handlers::preflight_no_content))
        .layer(trace)
        .with_state(state)
}
