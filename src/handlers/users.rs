use crate::{errors::ServiceError, ApiResponse, AppState};
use axum::{extract::State, response::IntoResponse, Json};

/// List known users. Read-only until real identity management lands.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "User list returned"),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "users"
)]
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let users = state.services.users.list().await?;
    Ok(Json(ApiResponse::success(users)))
}
