use crate::{
    entities::item,
    errors::ServiceError,
    services::items::{CreateItemInput, UpdateItemInput},
    ApiResponse, AppState, ListQuery, PaginatedResponse,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

/// List items with pagination and optional name search.
#[utoipa::path(
    get,
    path = "/api/v1/items",
    params(
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("limit" = Option<u64>, Query, description = "Page size"),
        ("search" = Option<String>, Query, description = "Filter by name substring"),
    ),
    responses(
        (status = 200, description = "Item list returned"),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let (items, total) = state
        .services
        .items
        .list(query.page, query.limit, query.search.as_deref())
        .await?;

    Ok(Json(ApiResponse::success(PaginatedResponse {
        total_pages: total.div_ceil(query.limit.max(1)),
        items,
        total,
        page: query.page,
        limit: query.limit,
    })))
}

/// Get one item.
#[utoipa::path(
    get,
    path = "/api/v1/items/{id}",
    params(("id" = Uuid, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item returned", body = item::Model),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.services.items.get(id).await?;
    Ok(Json(ApiResponse::success(item)))
}

/// Create an item. Stock starts at zero; use movements to bring units in.
#[utoipa::path(
    post,
    path = "/api/v1/items",
    request_body = CreateItemInput,
    responses(
        (status = 201, description = "Item created", body = item::Model),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<CreateItemInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.services.items.create(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(item))))
}

/// Update an item's descriptive fields.
#[utoipa::path(
    put,
    path = "/api/v1/items/{id}",
    params(("id" = Uuid, Path, description = "Item ID")),
    request_body = UpdateItemInput,
    responses(
        (status = 200, description = "Item updated", body = item::Model),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateItemInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.services.items.update(id, payload).await?;
    Ok(Json(ApiResponse::success(item)))
}

/// Delete an item and, via cascade, its movement history.
#[utoipa::path(
    delete,
    path = "/api/v1/items/{id}",
    params(("id" = Uuid, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.items.delete(id).await?;
    Ok(Json(json!({ "success": true, "deleted_id": id })))
}

/// Items at or below their reorder threshold.
pub async fn get_low_stock_items(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let items = state.services.items.low_stock().await?;
    Ok(Json(ApiResponse::success(items)))
}
