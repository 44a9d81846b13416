//! HTTP Basic access gate for the admin routes.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::error::ApiError;
use crate::state::SharedState;

/// `WWW-Authenticate` value sent with every rejection.
pub const CHALLENGE: &str = "Basic realm=\"Admin Bereich\"";

/// Single-account credential check.
#[derive(Clone)]
pub struct AccessGate {
    username: Arc<str>,
    password: Arc<str>,
}

impl AccessGate {
    pub fn new(username: impl Into<Arc<str>>, password: impl Into<Arc<str>>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Check the `Authorization` header of a request.
    ///
    /// Every failure mode yields the same error so callers cannot tell a
    /// wrong password from a malformed header.
    pub fn check(&self, headers: &HeaderMap) -> Result<(), ApiError> {
        let Some((user, pass)) = basic_credentials(headers) else {
            warn!("Admin request without usable credentials");
            return Err(ApiError::Unauthorized);
        };

        // Both comparisons always run.
        let user_ok = user.as_bytes().ct_eq(self.username.as_bytes());
        let pass_ok = pass.as_bytes().ct_eq(self.password.as_bytes());

        if bool::from(user_ok & pass_ok) {
            Ok(())
        } else {
            warn!(user = %user, "Rejected admin credentials");
            Err(ApiError::Unauthorized)
        }
    }
}

/// Decode `Authorization: Basic <base64(user:pass)>`.
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

/// Middleware guarding the admin routes.
pub async fn require_admin(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    state.gate.check(request.headers())?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn basic(credentials: &str) -> HeaderMap {
        headers(&format!("Basic {}", STANDARD.encode(credentials)))
    }

    fn gate() -> AccessGate {
        AccessGate::new("admin", "geheim")
    }

    #[test]
    fn test_accepts_matching_credentials() {
        assert!(gate().check(&basic("admin:geheim")).is_ok());
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let encoded = STANDARD.encode("admin:geheim");
        assert!(gate().check(&headers(&format!("basic {encoded}"))).is_ok());
        assert!(gate().check(&headers(&format!("BASIC {encoded}"))).is_ok());
    }

    #[test]
    fn test_password_may_contain_colon() {
        let gate = AccessGate::new("admin", "ge:heim");
        assert!(gate.check(&basic("admin:ge:heim")).is_ok());
    }

    #[test]
    fn test_rejections() {
        let gate = gate();

        assert!(gate.check(&HeaderMap::new()).is_err());
        assert!(gate.check(&basic("admin:falsch")).is_err());
        assert!(gate.check(&basic("root:geheim")).is_err());
        assert!(gate.check(&basic("admingeheim")).is_err());
        assert!(gate.check(&basic("admin:geheim2")).is_err());
        assert!(gate.check(&headers("Bearer abc")).is_err());
        assert!(gate.check(&headers("Basic %%%")).is_err());
        assert!(gate.check(&headers("Basic")).is_err());
    }
}
