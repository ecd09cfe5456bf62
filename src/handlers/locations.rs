use crate::{
    entities::location, errors::ServiceError, services::locations::CreateLocationInput,
    ApiResponse, AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

/// List all locations (warehouses, zones, racks, events, clients, rooms).
#[utoipa::path(
    get,
    path = "/api/v1/locations",
    responses(
        (status = 200, description = "Location list returned"),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "locations"
)]
pub async fn list_locations(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let locations = state.services.locations.list().await?;
    Ok(Json(ApiResponse::success(locations)))
}

pub async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let location = state.services.locations.get(id).await?;
    Ok(Json(ApiResponse::success(location)))
}

/// Create a location. `parent_id` must reference an existing location when
/// given.
#[utoipa::path(
    post,
    path = "/api/v1/locations",
    request_body = CreateLocationInput,
    responses(
        (status = 201, description = "Location created", body = location::Model),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "locations"
)]
pub async fn create_location(
    State(state): State<AppState>,
    Json(payload): Json<CreateLocationInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let location = state.services.locations.create(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(location))))
}

/// Delete a location; children are detached, not deleted.
#[utoipa::path(
    delete,
    path = "/api/v1/locations/{id}",
    params(("id" = Uuid, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Location deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "locations"
)]
pub async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.locations.delete(id).await?;
    Ok(Json(json!({ "success": true, "deleted_id": id })))
}
