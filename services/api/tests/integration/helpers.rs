use std::sync::{Arc, Mutex};

use axum_test::TestServer;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectOptions, ConnectionTrait, Database,
    DatabaseConnection, Schema,
};

use sib_api::domain::repository::{OtpRepository, RecordRepository};
use sib_api::domain::types::{OneTimePassword, Record};
use sib_api::error::ApiError;
use sib_api::router::build_router;
use sib_api::state::AppState;
use sib_api_schema::{otps, records};
use sib_testing::auth::MockAuth;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";

// ── MockRecordRepo ───────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockRecordRepo {
    pub records: Arc<Mutex<Vec<Record>>>,
}

impl MockRecordRepo {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a shared handle to the stored records for post-execution inspection.
    pub fn records_handle(&self) -> Arc<Mutex<Vec<Record>>> {
        Arc::clone(&self.records)
    }
}

impl RecordRepository for MockRecordRepo {
    async fn list_all(&self) -> Result<Vec<Record>, ApiError> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Record>, ApiError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn insert(&self, text: &str, now: DateTime<Utc>) -> Result<Record, ApiError> {
        let mut records = self.records.lock().unwrap();
        let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let record = Record {
            id,
            text: text.to_owned(),
            created_at: now,
            updated_at: now,
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn update_text(
        &self,
        id: i32,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, ApiError> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id == id) {
            Some(r) => {
                r.text = text.to_owned();
                r.updated_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }
}

/// Record repository whose every call fails like a dropped connection.
pub struct FailingRecordRepo;

impl RecordRepository for FailingRecordRepo {
    async fn list_all(&self) -> Result<Vec<Record>, ApiError> {
        Err(anyhow::anyhow!("connection closed").into())
    }

    async fn find_by_id(&self, _id: i32) -> Result<Option<Record>, ApiError> {
        Err(anyhow::anyhow!("connection closed").into())
    }

    async fn insert(&self, _text: &str, _now: DateTime<Utc>) -> Result<Record, ApiError> {
        Err(anyhow::anyhow!("connection closed").into())
    }

    async fn update_text(
        &self,
        _id: i32,
        _text: &str,
        _now: DateTime<Utc>,
    ) -> Result<bool, ApiError> {
        Err(anyhow::anyhow!("connection closed").into())
    }

    async fn delete(&self, _id: i32) -> Result<bool, ApiError> {
        Err(anyhow::anyhow!("connection closed").into())
    }
}

// ── MockOtpRepo ──────────────────────────────────────────────────────────────

pub struct MockOtpRepo {
    pub otps: Arc<Mutex<Vec<OneTimePassword>>>,
}

impl MockOtpRepo {
    pub fn new(otps: Vec<OneTimePassword>) -> Self {
        Self {
            otps: Arc::new(Mutex::new(otps)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn otps_handle(&self) -> Arc<Mutex<Vec<OneTimePassword>>> {
        Arc::clone(&self.otps)
    }
}

impl OtpRepository for MockOtpRepo {
    async fn find_by_code(&self, code: &str) -> Result<Option<OneTimePassword>, ApiError> {
        Ok(self
            .otps
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.code == code)
            .cloned())
    }

    async fn redeem(&self, code: &str, now: DateTime<Utc>) -> Result<bool, ApiError> {
        let mut otps = self.otps.lock().unwrap();
        match otps
            .iter_mut()
            .find(|o| o.code == code && o.is_redeemable(now))
        {
            Some(o) => {
                o.used = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub fn test_record(id: i32, text: &str) -> Record {
    let now = Utc::now();
    Record {
        id,
        text: text.to_owned(),
        created_at: now,
        updated_at: now,
    }
}

pub fn test_otp(code: &str) -> OneTimePassword {
    OneTimePassword {
        code: code.to_owned(),
        used: false,
        expires_at: Utc::now() + Duration::minutes(10),
    }
}

pub fn mock_auth() -> MockAuth {
    MockAuth::new(TEST_JWT_SECRET)
}

/// In-memory SQLite database with the `records` and `otps` tables created from the entities.
pub async fn sqlite_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    // Every pooled connection would otherwise get its own empty in-memory database.
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.unwrap();

    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    db.execute(backend.build(&schema.create_table_from_entity(records::Entity)))
        .await
        .unwrap();
    db.execute(backend.build(&schema.create_table_from_entity(otps::Entity)))
        .await
        .unwrap();
    db
}

/// Insert an OTP row the way the out-of-band provisioning would.
pub async fn seed_otp(
    db: &DatabaseConnection,
    code: &str,
    used: bool,
    expires_at: DateTime<Utc>,
) {
    otps::ActiveModel {
        code: Set(code.to_owned()),
        used: Set(used),
        expires_at: Set(expires_at),
    }
    .insert(db)
    .await
    .unwrap();
}

/// Router over a fresh SQLite database. Returns the server and the database handle.
pub async fn test_server() -> (TestServer, DatabaseConnection) {
    let db = sqlite_db().await;
    let state = AppState::new(db.clone(), TEST_JWT_SECRET);
    let server = TestServer::new(build_router(state)).unwrap();
    (server, db)
}
