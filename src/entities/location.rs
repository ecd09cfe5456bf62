use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Storage or client location. `parent_id` forms an optional tree among
/// internal storage locations (warehouse -> zone -> rack); clients and event
/// venues are typically roots.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = Location)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub kind: LocationKind,
    #[sea_orm(nullable)]
    pub parent_id: Option<Uuid>,
    #[sea_orm(nullable)]
    pub address: Option<String>,
    #[sea_orm(nullable)]
    pub contact_info: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id"
    )]
    Parent,
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
pub enum LocationKind {
    #[sea_orm(string_value = "WAREHOUSE")]
    Warehouse,
    #[sea_orm(string_value = "ZONE")]
    Zone,
    #[sea_orm(string_value = "RACK")]
    Rack,
    #[sea_orm(string_value = "EVENT")]
    Event,
    #[sea_orm(string_value = "CLIENT")]
    Client,
    #[sea_orm(string_value = "ROOM")]
    Room,
}
