use chrono::Utc;

use crate::domain::repository::RecordRepository;
use crate::domain::types::{Record, TEXT_REQUIRED_ON_CREATE, TEXT_REQUIRED_ON_UPDATE};
use crate::error::ApiError;

/// Storage ids are `i32`; a wider id cannot match any row.
fn storage_id(id: i64) -> Result<i32, ApiError> {
    i32::try_from(id).map_err(|_| ApiError::RecordNotFound(id))
}

// ── ListRecords ──────────────────────────────────────────────────────────────

pub struct ListRecordsUseCase<R: RecordRepository> {
    pub repo: R,
}

impl<R: RecordRepository> ListRecordsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Record>, ApiError> {
        self.repo.list_all().await
    }
}

// ── GetRecord ────────────────────────────────────────────────────────────────

pub struct GetRecordUseCase<R: RecordRepository> {
    pub repo: R,
}

impl<R: RecordRepository> GetRecordUseCase<R> {
    pub async fn execute(&self, id: i64) -> Result<Record, ApiError> {
        self.repo
            .find_by_id(storage_id(id)?)
            .await?
            .ok_or(ApiError::RecordNotFound(id))
    }
}

// ── CreateRecord ─────────────────────────────────────────────────────────────

pub struct CreateRecordInput {
    pub text: String,
}

pub struct CreateRecordUseCase<R: RecordRepository> {
    pub repo: R,
}

impl<R: RecordRepository> CreateRecordUseCase<R> {
    pub async fn execute(&self, input: CreateRecordInput) -> Result<Record, ApiError> {
        if input.text.is_empty() {
            return Err(ApiError::MissingField(TEXT_REQUIRED_ON_CREATE));
        }
        let record = self.repo.insert(&input.text, Utc::now()).await?;
        tracing::debug!(id = record.id, "record created");
        Ok(record)
    }
}

// ── UpdateRecord ─────────────────────────────────────────────────────────────

pub struct UpdateRecordInput {
    pub text: String,
}

pub struct UpdateRecordUseCase<R: RecordRepository> {
    pub repo: R,
}

impl<R: RecordRepository> UpdateRecordUseCase<R> {
    pub async fn execute(&self, id: i64, input: UpdateRecordInput) -> Result<(), ApiError> {
        if input.text.is_empty() {
            return Err(ApiError::MissingField(TEXT_REQUIRED_ON_UPDATE));
        }
        let key = storage_id(id)?;
        if !self.repo.update_text(key, &input.text, Utc::now()).await? {
            return Err(ApiError::RecordNotFound(id));
        }
        Ok(())
    }
}

// ── DeleteRecord ─────────────────────────────────────────────────────────────

pub struct DeleteRecordUseCase<R: RecordRepository> {
    pub repo: R,
}

impl<R: RecordRepository> DeleteRecordUseCase<R> {
    pub async fn execute(&self, id: i64) -> Result<(), ApiError> {
        if !self.repo.delete(storage_id(id)?).await? {
            return Err(ApiError::RecordNotFound(id));
        }
        Ok(())
    }
}
