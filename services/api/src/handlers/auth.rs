use axum::{Json, extract::State};
use serde::{Deserialize, Deserializer, Serialize};

use sib_auth_types::bearer::Authenticated;

use crate::error::ApiError;
use crate::handlers::extract::{JsonBody, string_field};
use crate::state::AppState;
use crate::usecase::authenticate::{AuthenticateInput, AuthenticateUseCase};

// ── POST /authenticate ───────────────────────────────────────────────────────

pub struct AuthenticateRequest {
    pub otp: String,
}

impl<'de> Deserialize<'de> for AuthenticateRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        string_field(deserializer, "otp").map(|otp| Self { otp })
    }
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

pub async fn authenticate(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<AuthenticateRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let usecase = AuthenticateUseCase {
        otps: state.otp_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase.execute(AuthenticateInput { otp: body.otp }).await?;
    Ok(Json(TokenResponse { token: out.token }))
}

// ── GET /is-authenticated ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AuthenticatedResponse {
    /// A string, not a bool, to keep the existing wire format.
    pub authenticated: &'static str,
}

pub async fn is_authenticated(_auth: Authenticated) -> Json<AuthenticatedResponse> {
    Json(AuthenticatedResponse {
        authenticated: "true",
    })
}
