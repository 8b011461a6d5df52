use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, sea_query::Expr,
};

use sib_api_schema::{otps, records};

use crate::domain::repository::{OtpRepository, RecordRepository};
use crate::domain::types::{OneTimePassword, Record};
use crate::error::ApiError;

// ── Record repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecordRepository {
    pub db: DatabaseConnection,
}

impl RecordRepository for DbRecordRepository {
    async fn list_all(&self) -> Result<Vec<Record>, ApiError> {
        let models = records::Entity::find()
            .order_by_asc(records::Column::Id)
            .all(&self.db)
            .await
            .context("list records")?;
        Ok(models.into_iter().map(record_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Record>, ApiError> {
        let model = records::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find record by id")?;
        Ok(model.map(record_from_model))
    }

    async fn insert(&self, text: &str, now: DateTime<Utc>) -> Result<Record, ApiError> {
        let model = records::ActiveModel {
            text: Set(text.to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("insert record")?;
        Ok(record_from_model(model))
    }

    async fn update_text(
        &self,
        id: i32,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, ApiError> {
        let result = records::Entity::update_many()
            .col_expr(records::Column::Text, Expr::value(text))
            .col_expr(records::Column::UpdatedAt, Expr::value(now))
            .filter(records::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update record")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let result = records::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete record")?;
        Ok(result.rows_affected > 0)
    }
}

fn record_from_model(model: records::Model) -> Record {
    Record {
        id: model.id,
        text: model.text,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── One-time password repository ─────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<OneTimePassword>, ApiError> {
        let model = otps::Entity::find_by_id(code.to_owned())
            .one(&self.db)
            .await
            .context("find otp by code")?;
        Ok(model.map(otp_from_model))
    }

    async fn redeem(&self, code: &str, now: DateTime<Utc>) -> Result<bool, ApiError> {
        // UPDATE otps SET used = true WHERE otp = $1 AND used = false AND expiresat > $2
        let result = otps::Entity::update_many()
            .col_expr(otps::Column::Used, Expr::value(true))
            .filter(otps::Column::Code.eq(code))
            .filter(otps::Column::Used.eq(false))
            .filter(otps::Column::ExpiresAt.gt(now))
            .exec(&self.db)
            .await
            .context("redeem otp")?;
        Ok(result.rows_affected == 1)
    }
}

fn otp_from_model(model: otps::Model) -> OneTimePassword {
    OneTimePassword {
        code: model.code,
        used: model.used,
        expires_at: model.expires_at,
    }
}
