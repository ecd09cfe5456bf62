//! StockFlow API Library
//!
//! Inventory backend for an audiovisual equipment rental business: items,
//! locations, an append-only stock-movement ledger with derived stock and
//! status, comments, reporting, and an optional AI analysis assistant.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod commands;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod ledger;
pub mod metrics;
pub mod openapi;
pub mod services;

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use utoipa::ToSchema;

/// Shared application state, passed to handlers by injection. There is no
/// process-wide singleton.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: handlers::AppServices,
}

/// Common query parameters for list endpoints.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub search: Option<String>,
}

fn default_page() -> u64 {
    1
}
fn default_limit() -> u64 {
    20
}

/// Common response wrapper.
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

/// Standard API result type for JSON responses
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, errors::ServiceError>;

/// All v1 API routes.
pub fn api_v1_routes() -> Router<AppState> {
    let items = Router::new()
        .route(
            "/items",
            get(handlers::items::list_items).post(handlers::items::create_item),
        )
        .route("/items/low-stock", get(handlers::items::get_low_stock_items))
        .route(
            "/items/:id",
            get(handlers::items::get_item)
                .put(handlers::items::update_item)
                .delete(handlers::items::delete_item),
        );

    let locations = Router::new()
        .route(
            "/locations",
            get(handlers::locations::list_locations).post(handlers::locations::create_location),
        )
        .route(
            "/locations/:id",
            get(handlers::locations::get_location).delete(handlers::locations::delete_location),
        );

    let movements = Router::new()
        .route(
            "/movements",
            get(handlers::movements::list_movements).post(handlers::movements::record_movement),
        )
        .route("/movements/:id", get(handlers::movements::get_movement));

    let comments = Router::new()
        .route(
            "/comments",
            get(handlers::comments::list_comments).post(handlers::comments::create_comment),
        )
        .route(
            "/comments/:id",
            axum::routing::delete(handlers::comments::delete_comment),
        );

    let reports = Router::new()
        .route("/reports/dashboard", get(handlers::reports::dashboard))
        .route(
            "/reports/inventory/export",
            get(handlers::reports::export_inventory_csv),
        );

    Router::new()
        .route("/status", get(api_status))
        .route("/health", get(health_check))
        .merge(items)
        .merge(locations)
        .merge(movements)
        .merge(comments)
        .merge(reports)
        .route("/users", get(handlers::users::list_users))
        .route(
            "/assistant/analyze",
            post(handlers::assistant::analyze_inventory),
        )
}

async fn api_status() -> Result<Json<ApiResponse<Value>>, errors::ServiceError> {
    let status_data = json!({
        "status": "ok",
        "service": "stockflow-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    Ok(Json(ApiResponse::success(status_data)))
}

async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Value>>, errors::ServiceError> {
    let db_status = match db::check_connection(&state.db).await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    let health_data = json!({
        "status": db_status,
        "checks": {
            "database": db_status,
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    Ok(Json(ApiResponse::success(health_data)))
}
