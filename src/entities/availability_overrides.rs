use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;

// One row per (scooter_id, day); the pair carries a unique index so the
// toggle upsert can target it directly.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "availability_overrides")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub scooter_id: i64,
    pub day: NaiveDate,
    pub is_available: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
