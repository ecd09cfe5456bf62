use crate::{errors::ServiceError, ApiResponse, AppState};
use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::common::validate_input;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AnalyzeRequest {
    #[validate(length(min = 1, max = 2000, message = "must be between 1 and 2000 characters"))]
    pub query: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    pub analysis: String,
}

/// Ask the assistant about the current inventory. The response is always a
/// 200; assistant failures degrade to a fixed message.
#[utoipa::path(
    post,
    path = "/api/v1/assistant/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis returned", body = AnalyzeResponse),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "assistant"
)]
pub async fn analyze_inventory(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let inventory = state.services.items.all().await?;
    let recent_movements = state.services.movements.list_recent(20).await?;

    let analysis = state
        .services
        .assistant
        .analyze(&payload.query, &inventory, &recent_movements)
        .await;

    Ok(Json(ApiResponse::success(AnalyzeResponse { analysis })))
}
