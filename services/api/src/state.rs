use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use sib_auth_types::bearer::JwtSecret;

use crate::infra::db::{DbOtpRepository, DbRecordRepository};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: JwtSecret,
}

impl AppState {
    pub fn new(db: DatabaseConnection, jwt_secret: impl Into<String>) -> Self {
        Self {
            db,
            jwt_secret: JwtSecret::new(jwt_secret.into()),
        }
    }

    pub fn record_repo(&self) -> DbRecordRepository {
        DbRecordRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_secret.clone()
    }
}
