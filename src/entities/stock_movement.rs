use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One entry of the append-only stock ledger. Rows are immutable once
/// created; item stock is a running reduction over them.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = StockMovement)]
#[sea_orm(table_name = "stock_movements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub item_id: Uuid,
    pub movement_type: MovementType,
    pub quantity: i32,
    #[sea_orm(nullable)]
    pub from_location_id: Option<Uuid>,
    #[sea_orm(nullable)]
    pub to_location_id: Option<Uuid>,
    #[sea_orm(nullable, column_type = "Text")]
    pub note: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::ItemId",
        to = "super::item::Column::Id"
    )]
    Item,
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::FromLocationId",
        to = "super::location::Column::Id"
    )]
    FromLocation,
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::ToLocationId",
        to = "super::location::Column::Id"
    )]
    ToLocation,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    CreatedBy,
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreatedBy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

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
pub enum MovementType {
    /// Stock entering the warehouse (purchase, rental return).
    #[sea_orm(string_value = "IN")]
    In,
    /// Stock leaving (rental checkout, loss).
    #[sea_orm(string_value = "OUT")]
    Out,
    /// Relocation between locations; total stock unchanged.
    #[sea_orm(string_value = "TRANSFER")]
    Transfer,
    /// Additive correction (cycle count delta).
    #[sea_orm(string_value = "ADJUST")]
    Adjust,
}
