#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use crate::domain::types::{OneTimePassword, Record};
use crate::error::ApiError;

/// Repository for the `records` table.
pub trait RecordRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Record>, ApiError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Record>, ApiError>;

    /// Insert a record with both timestamps set to `now`. The id is assigned by storage.
    async fn insert(&self, text: &str, now: DateTime<Utc>) -> Result<Record, ApiError>;

    /// Replace the text and bump `updated_at`. Returns `false` if no record has `id`.
    async fn update_text(&self, id: i32, text: &str, now: DateTime<Utc>)
    -> Result<bool, ApiError>;

    /// Returns `true` if deleted, `false` if not found.
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;
}

/// Repository for one-time passwords.
pub trait OtpRepository: Send + Sync {
    async fn find_by_code(&self, code: &str) -> Result<Option<OneTimePassword>, ApiError>;

    /// Mark the code used if it is unused and unexpired at `now`, in a single
    /// conditional statement. Returns `true` only for the call that consumed it.
    async fn redeem(&self, code: &str, now: DateTime<Utc>) -> Result<bool, ApiError>;
}
