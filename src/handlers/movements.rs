use crate::{
    commands::RecordMovementCommand,
    entities::{stock_movement, ItemStatus, MovementType},
    errors::ServiceError,
    services::movements::DEFAULT_FEED_LIMIT,
    ApiResponse, AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct MovementFeedQuery {
    /// Maximum number of movements to return (newest first)
    pub limit: Option<u64>,
    /// Restrict the feed to one item's history
    pub item_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordMovementRequest {
    pub item_id: Uuid,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub quantity: i32,
    pub from_location_id: Option<Uuid>,
    pub to_location_id: Option<Uuid>,
    pub note: Option<String>,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MovementRecordedResponse {
    pub movement: stock_movement::Model,
    pub previous_stock: i32,
    pub new_stock: i32,
    pub status: ItemStatus,
}

/// Latest movements, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/movements",
    params(
        ("limit" = Option<u64>, Query, description = "Feed size, defaults to 50"),
        ("item_id" = Option<Uuid>, Query, description = "Restrict to one item"),
    ),
    responses(
        (status = 200, description = "Movement feed returned"),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "movements"
)]
pub async fn list_movements(
    State(state): State<AppState>,
    Query(query): Query<MovementFeedQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let movements = match query.item_id {
        Some(item_id) => state.services.movements.list_for_item(item_id).await?,
        None => {
            state
                .services
                .movements
                .list_recent(query.limit.unwrap_or(DEFAULT_FEED_LIMIT))
                .await?
        }
    };
    Ok(Json(ApiResponse::success(movements)))
}

pub async fn get_movement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let movement = state.services.movements.get(id).await?;
    Ok(Json(ApiResponse::success(movement)))
}

/// Record a stock movement. The movement insert and the item's stock/status
/// update happen in one transaction.
#[utoipa::path(
    post,
    path = "/api/v1/movements",
    request_body = RecordMovementRequest,
    responses(
        (status = 201, description = "Movement recorded", body = MovementRecordedResponse),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Insufficient stock", body = crate::errors::ErrorResponse)
    ),
    tag = "movements"
)]
pub async fn record_movement(
    State(state): State<AppState>,
    Json(payload): Json<RecordMovementRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let command = RecordMovementCommand {
        item_id: payload.item_id,
        movement_type: payload.movement_type,
        quantity: payload.quantity,
        from_location_id: payload.from_location_id,
        to_location_id: payload.to_location_id,
        note: payload.note,
        created_by: payload.created_by,
    };

    let result = state.services.movements.record(command).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(MovementRecordedResponse {
            movement: result.movement,
            previous_stock: result.previous_stock,
            new_stock: result.new_stock,
            status: result.new_status,
        })),
    ))
}
