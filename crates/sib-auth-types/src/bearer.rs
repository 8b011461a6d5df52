//! `Authorization` header gate for protected routes.
//!
//! Add [`Authenticated`] as the first argument of a handler to protect it.
//! Requests that fail the check get `401 {"message":"Access denied."}` and the
//! handler body never runs.

use std::sync::Arc;

use axum::Json;
use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Response};
use http::request::Parts;
use http::{StatusCode, header::AUTHORIZATION};

use crate::token::{JwtClaims, validate_token};

pub const ACCESS_DENIED: &str = "Access denied.";

/// HMAC secret used to verify bearer tokens, pulled from router state via `FromRef`.
#[derive(Debug, Clone)]
pub struct JwtSecret(pub Arc<str>);

impl JwtSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Claims of a verified bearer token.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub claims: JwtClaims,
}

/// Rejection returned when the gate refuses a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDenied;

impl IntoResponse for AccessDenied {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "message": ACCESS_DENIED });
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

/// Split an `Authorization` value of the exact shape `"<scheme> <token>"`.
///
/// The value is split on single spaces and must yield exactly two parts; the
/// scheme word itself is not inspected.
pub fn parse_authorization(value: &str) -> Option<&str> {
    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        [_scheme, token] => Some(*token),
        _ => None,
    }
}

/// Verify the `Authorization` header of `parts` against `secret`.
pub fn authenticate(parts: &Parts, secret: &str) -> Result<Authenticated, AccessDenied> {
    let value = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or(AccessDenied)?;

    let token = parse_authorization(value).ok_or(AccessDenied)?;

    let claims = validate_token(token, secret).map_err(|e| {
        tracing::debug!(error = %e, "bearer token rejected");
        AccessDenied
    })?;

    Ok(Authenticated { claims })
}

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = AccessDenied;

    // Resolve synchronously and hand back a 'static future; axum-core 0.5 declares
    // this method as `fn -> impl Future + Send`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = JwtSecret::from_ref(state);
        let result = authenticate(parts, secret.as_str());
        async move { result }
    }
}
