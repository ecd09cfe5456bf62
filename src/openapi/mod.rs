use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{entities, errors, handlers, services};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "StockFlow API",
        version = "0.3.0",
        description = r#"
Inventory backend for an audiovisual equipment rental business.

Items, storage/client locations and free-text comments are plain CRUD. Stock
itself is never edited directly: every change is an immutable entry in the
movement ledger (IN / OUT / TRANSFER / ADJUST), and each item's
`current_stock` and `status` are recomputed transactionally when a movement
is recorded.
"#,
        contact(name = "StockFlow", email = "support@stockflow.pro")
    ),
    paths(
        handlers::items::list_items,
        handlers::items::get_item,
        handlers::items::create_item,
        handlers::items::update_item,
        handlers::items::delete_item,
        handlers::locations::list_locations,
        handlers::locations::create_location,
        handlers::locations::delete_location,
        handlers::movements::list_movements,
        handlers::movements::record_movement,
        handlers::comments::list_comments,
        handlers::comments::create_comment,
        handlers::comments::delete_comment,
        handlers::users::list_users,
        handlers::reports::dashboard,
        handlers::reports::export_inventory_csv,
        handlers::assistant::analyze_inventory,
    ),
    components(schemas(
        entities::item::Model,
        entities::item::ItemStatus,
        entities::location::Model,
        entities::location::LocationKind,
        entities::stock_movement::Model,
        entities::stock_movement::MovementType,
        entities::comment::Model,
        entities::comment::CommentEntityType,
        entities::user::Model,
        entities::user::UserRole,
        services::items::CreateItemInput,
        services::items::UpdateItemInput,
        services::locations::CreateLocationInput,
        services::comments::CreateCommentInput,
        services::reports::DashboardStats,
        services::reports::CategoryCount,
        handlers::movements::RecordMovementRequest,
        handlers::movements::MovementRecordedResponse,
        handlers::assistant::AnalyzeRequest,
        handlers::assistant::AnalyzeResponse,
        errors::ErrorResponse,
    )),
    tags(
        (name = "items", description = "Catalog items and derived stock state"),
        (name = "locations", description = "Storage and client locations"),
        (name = "movements", description = "Append-only stock ledger"),
        (name = "comments", description = "Annotations on items, movements and locations"),
        (name = "users", description = "Accounts (read-only)"),
        (name = "reports", description = "CSV export and dashboard aggregates"),
        (name = "assistant", description = "AI inventory analysis"),
    )
)]
pub struct ApiDoc;

/// Swagger UI mounted at `/docs`, serving the generated document.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
