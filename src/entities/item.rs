use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Rental inventory item (camera body, microphone, cable drum, ...).
///
/// `current_stock` and `status` are derived from the movement ledger and are
/// only ever written by the movement recorder; handlers must not set them.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = Item)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub category: String,
    pub min_stock_threshold: i32,
    #[sea_orm(column_type = "Json")]
    pub tags: Json, // Vec<String> serialized
    pub image_url: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub current_stock: i32,
    pub status: ItemStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stock_movement::Entity")]
    StockMovements,
}

impl Related<super::stock_movement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockMovements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Derived availability status.
///
/// `Maintenance` is set by operators only; the ledger reducer never produces
/// it and the next recorded movement overwrites it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumIter,
    DeriveActiveEnum,
    strum::Display,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum ItemStatus {
    #[sea_orm(string_value = "OK")]
    Ok,
    #[sea_orm(string_value = "LOW")]
    Low,
    #[sea_orm(string_value = "MAINTENANCE")]
    Maintenance,
    #[sea_orm(string_value = "UNAVAILABLE")]
    Unavailable,
}
