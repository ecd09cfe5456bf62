use crate::{errors::ServiceError, services::reports::DashboardStats, ApiResponse, AppState};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

/// Dashboard aggregates: stock totals, low-stock count, recent loans.
#[utoipa::path(
    get,
    path = "/api/v1/reports/dashboard",
    responses(
        (status = 200, description = "Dashboard statistics returned", body = DashboardStats),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "reports"
)]
pub async fn dashboard(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let stats = state.services.reports.dashboard().await?;
    Ok(Json(ApiResponse::success(stats)))
}

/// Inventory snapshot as a CSV download.
#[utoipa::path(
    get,
    path = "/api/v1/reports/inventory/export",
    responses(
        (status = 200, description = "CSV export returned", content_type = "text/csv"),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "reports"
)]
pub async fn export_inventory_csv(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let csv = state.services.reports.inventory_csv().await?;

    let filename = format!(
        "inventory_export_{}.csv",
        chrono::Utc::now().format("%Y-%m-%d")
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    ))
}
