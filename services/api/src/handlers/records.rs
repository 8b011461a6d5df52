use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use sib_auth_types::bearer::Authenticated;

use crate::domain::types::Record;
use crate::error::ApiError;
use crate::handlers::extract::{JsonBody, RecordId, string_field};
use crate::state::AppState;
use crate::usecase::record::{
    CreateRecordInput, CreateRecordUseCase, DeleteRecordUseCase, GetRecordUseCase,
    ListRecordsUseCase, UpdateRecordInput, UpdateRecordUseCase,
};

/// `{"Text": "..."}`. The key is matched ignoring case.
pub struct RecordRequest {
    pub text: String,
}

impl<'de> Deserialize<'de> for RecordRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        string_field(deserializer, "Text").map(|text| Self { text })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponse {
    pub id: i32,
    pub text: String,
    #[serde(serialize_with = "sib_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "sib_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Record> for RecordResponse {
    fn from(record: Record) -> Self {
        Self {
            id: record.id,
            text: record.text,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ── GET /records ─────────────────────────────────────────────────────────────

pub async fn list_records(
    _auth: Authenticated,
    State(state): State<AppState>,
) -> Result<Json<Vec<RecordResponse>>, ApiError> {
    let usecase = ListRecordsUseCase {
        repo: state.record_repo(),
    };
    let records = usecase.execute().await?;
    Ok(Json(records.into_iter().map(RecordResponse::from).collect()))
}

// ── GET /records/{id} ────────────────────────────────────────────────────────

pub async fn get_record(
    _auth: Authenticated,
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Json<RecordResponse>, ApiError> {
    let usecase = GetRecordUseCase {
        repo: state.record_repo(),
    };
    let record = usecase.execute(id).await?;
    Ok(Json(record.into()))
}

// ── POST /records ────────────────────────────────────────────────────────────

pub async fn create_record(
    _auth: Authenticated,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RecordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let usecase = CreateRecordUseCase {
        repo: state.record_repo(),
    };
    usecase
        .execute(CreateRecordInput { text: body.text })
        .await?;
    Ok(Json(MessageResponse {
        message: "Record successfully added.",
    }))
}

// ── PUT /records/{id} ────────────────────────────────────────────────────────

pub async fn update_record(
    _auth: Authenticated,
    State(state): State<AppState>,
    RecordId(id): RecordId,
    JsonBody(body): JsonBody<RecordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let usecase = UpdateRecordUseCase {
        repo: state.record_repo(),
    };
    usecase
        .execute(id, UpdateRecordInput { text: body.text })
        .await?;
    Ok(Json(MessageResponse {
        message: "Record successfully updated.",
    }))
}

// ── DELETE /records/{id} ─────────────────────────────────────────────────────

pub async fn delete_record(
    _auth: Authenticated,
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Json<MessageResponse>, ApiError> {
    let usecase = DeleteRecordUseCase {
        repo: state.record_repo(),
    };
    usecase.execute(id).await?;
    Ok(Json(MessageResponse {
        message: "record deleted successfully.",
    }))
}
