use sea_orm::entity::prelude::*;

/// One-time password exchanged for a bearer token.
/// Rows are provisioned out of band; this service only flips `used`.
/// `expiresat` is `timestamptz`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "otps")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "otp")]
    pub code: String,
    pub used: bool,
    #[sea_orm(column_name = "expiresat")]
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
