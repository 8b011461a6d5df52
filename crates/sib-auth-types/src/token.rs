//! JWT issuing and validation.
//!
//! Tokens carry a single `exp` claim and are signed with an HMAC secret. There
//! is no subject: holding a valid token is the whole grant.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Token lifetime: 100 years.
pub const TOKEN_TTL_SECS: u64 = 60 * 60 * 24 * 365 * 100;

/// JWT claims payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

/// Errors returned by [`issue_token`] and [`validate_token`].
///
/// Callers answering HTTP requests collapse every validation variant into a
/// single "access denied"; the distinction only feeds the logs.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Sign a new HS256 token valid for [`TOKEN_TTL_SECS`]. Returns the token and its `exp`.
pub fn issue_token(secret: &str) -> Result<(String, u64), TokenError> {
    let exp = now_secs() + TOKEN_TTL_SECS;
    let token = sign_claims(&JwtClaims { exp }, secret)?;
    Ok((token, exp))
}

/// Sign arbitrary claims with HS256.
pub fn sign_claims(claims: &JwtClaims, secret: &str) -> Result<String, TokenError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(TokenError::Signing)
}

/// Decode and validate a token.
///
/// Accepts the HMAC family only (HS256/384/512); `exp` is required and checked
/// with no leeway, so a token stops working at its expiration instant.
pub fn validate_token(token: &str, secret: &str) -> Result<JwtClaims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
    validation.validate_exp = true;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })?;

    Ok(data.claims)
}
