use sea_orm::entity::prelude::*;

/// A stored text record. Column names match the pre-existing `records` table;
/// `createdat` and `updatedat` are `timestamptz`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub text: String,
    #[sea_orm(column_name = "createdat")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[sea_orm(column_name = "updatedat")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
