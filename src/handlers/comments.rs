use crate::{
    entities::{comment, CommentEntityType},
    errors::ServiceError,
    services::comments::CreateCommentInput,
    ApiResponse, AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentFilter {
    pub entity_type: Option<CommentEntityType>,
    pub entity_id: Option<Uuid>,
}

/// List comments newest-first, optionally filtered to one entity.
/// `entity_type` and `entity_id` must be given together.
#[utoipa::path(
    get,
    path = "/api/v1/comments",
    params(
        ("entity_type" = Option<String>, Query, description = "ITEM, MOVEMENT or LOCATION"),
        ("entity_id" = Option<Uuid>, Query, description = "Entity the comments are attached to"),
    ),
    responses(
        (status = 200, description = "Comment list returned"),
        (status = 400, description = "Invalid filter", body = crate::errors::ErrorResponse)
    ),
    tag = "comments"
)]
pub async fn list_comments(
    State(state): State<AppState>,
    Query(filter): Query<CommentFilter>,
) -> Result<impl IntoResponse, ServiceError> {
    let entity = match (filter.entity_type, filter.entity_id) {
        (Some(entity_type), Some(entity_id)) => Some((entity_type, entity_id)),
        (None, None) => None,
        _ => {
            return Err(ServiceError::InvalidInput(
                "entity_type and entity_id must be provided together".to_string(),
            ))
        }
    };

    let comments = state.services.comments.list(entity).await?;
    Ok(Json(ApiResponse::success(comments)))
}

/// Attach a comment to an item, movement or location.
#[utoipa::path(
    post,
    path = "/api/v1/comments",
    request_body = CreateCommentInput,
    responses(
        (status = 201, description = "Comment created", body = comment::Model),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Referenced entity not found", body = crate::errors::ErrorResponse)
    ),
    tag = "comments"
)]
pub async fn create_comment(
    State(state): State<AppState>,
    Json(payload): Json<CreateCommentInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let comment = state.services.comments.create(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(comment))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/comments/{id}",
    params(("id" = Uuid, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "comments"
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.comments.delete(id).await?;
    Ok(Json(json!({ "success": true, "deleted_id": id })))
}
