//! Bearer-token helpers for integration tests.
//!
//! Protected routes verify a real JWT, so tests sign one with the same secret
//! the router under test was built with.

use http::{HeaderName, HeaderValue, header::AUTHORIZATION};

use sib_auth_types::token::{JwtClaims, issue_token, sign_claims};

/// Signs bearer tokens with a fixed secret.
pub struct MockAuth {
    pub secret: String,
}

impl MockAuth {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// A freshly issued, valid token.
    pub fn token(&self) -> String {
        issue_token(&self.secret).unwrap().0
    }

    /// A correctly signed token that expired long ago.
    pub fn expired_token(&self) -> String {
        sign_claims(&JwtClaims { exp: 1_000_000 }, &self.secret).unwrap()
    }

    /// `Authorization: Bearer <token>` with a valid token.
    pub fn header(&self) -> (HeaderName, HeaderValue) {
        Self::bearer(&self.token())
    }

    /// `Authorization: Bearer <token>` for an arbitrary token string.
    pub fn bearer(token: &str) -> (HeaderName, HeaderValue) {
        (
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        )
    }
}
