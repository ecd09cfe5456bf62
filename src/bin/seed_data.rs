//! Seed data script - populates the database with realistic demo data
//!
//! Run with: cargo run --bin seed-data
//!
//! This creates:
//! - 2 users (admin + manager)
//! - 4 locations (warehouse with two zones, one event venue)
//! - 5 items (cameras, audio, video, cables, support)
//! - Opening IN movements plus a few OUT movements, so derived stock and
//!   status are non-trivial

use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

use stockflow_api::{
    commands::RecordMovementCommand,
    config::AppConfig,
    db,
    entities::{
        item, location,
        location::LocationKind,
        user,
        user::UserRole,
        MovementType,
    },
    events::{process_events, EventSender},
    services::MovementService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("=== StockFlow API Seed Data ===");

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://stockflow.db?mode=rwc".to_string());
    let cfg = AppConfig::new(database_url, "127.0.0.1".to_string(), 8080, "development".into());

    let pool = db::establish_connection_from_app_config(&cfg).await?;
    db::run_migrations(&pool).await?;
    let db = Arc::new(pool);

    if item::Entity::find().count(db.as_ref()).await? > 0 {
        info!("Database already seeded; nothing to do");
        return Ok(());
    }

    let (tx, rx) = mpsc::channel(100);
    let sender = EventSender::new(tx);
    tokio::spawn(process_events(rx));

    info!("Creating users...");
    let admin = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Alice Admin".into()),
        email: Set("alice@stockflow.pro".into()),
        role: Set(UserRole::Admin),
        avatar: Set(Some(
            "https://ui-avatars.com/api/?name=Alice&background=random".into(),
        )),
        created_at: Set(Utc::now()),
    }
    .insert(db.as_ref())
    .await?;

    let manager = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Bob Manager".into()),
        email: Set("bob@stockflow.pro".into()),
        role: Set(UserRole::Manager),
        avatar: Set(None),
        created_at: Set(Utc::now()),
    }
    .insert(db.as_ref())
    .await?;

    info!("Creating locations...");
    let warehouse = insert_location(db.as_ref(), "Main Warehouse", LocationKind::Warehouse, None).await?;
    let zone_cameras = insert_location(
        db.as_ref(),
        "Zone A (Cameras)",
        LocationKind::Zone,
        Some(warehouse.id),
    )
    .await?;
    let zone_audio = insert_location(
        db.as_ref(),
        "Zone B (Audio)",
        LocationKind::Zone,
        Some(warehouse.id),
    )
    .await?;
    let event_venue =
        insert_location(db.as_ref(), "External Event: TechConf", LocationKind::Event, None).await?;

    info!("Creating items...");
    let camera = insert_item(
        db.as_ref(),
        ItemSeed {
            name: "Sony Alpha a7S III",
            brand: "Sony",
            model: "ILCE7SM3",
            category: "Camera",
            min_stock_threshold: 2,
            tags: &["4k", "mirrorless", "high-demand"],
            description: "Full-frame mirrorless camera optimized for video.",
        },
    )
    .await?;
    let microphone = insert_item(
        db.as_ref(),
        ItemSeed {
            name: "Sennheiser MKH 416",
            brand: "Sennheiser",
            model: "MKH 416",
            category: "Audio",
            min_stock_threshold: 3,
            tags: &["shotgun", "microphone", "boom"],
            description: "Industry standard shotgun microphone.",
        },
    )
    .await?;
    let switcher = insert_item(
        db.as_ref(),
        ItemSeed {
            name: "Blackmagic ATEM Mini Pro",
            brand: "Blackmagic",
            model: "SWATEMMINIBPR",
            category: "Video Switcher",
            min_stock_threshold: 1,
            tags: &["streaming", "switcher"],
            description: "HDMI Live Stream Switcher.",
        },
    )
    .await?;
    let cable = insert_item(
        db.as_ref(),
        ItemSeed {
            name: "HDMI Cable 10m",
            brand: "Generic",
            model: "HDMI-10",
            category: "Cables",
            min_stock_threshold: 10,
            tags: &["cable", "hdmi"],
            description: "High speed HDMI cable, braided.",
        },
    )
    .await?;
    let tripod = insert_item(
        db.as_ref(),
        ItemSeed {
            name: "Manfrotto 504X Tripod",
            brand: "Manfrotto",
            model: "504X",
            category: "Support",
            min_stock_threshold: 4,
            tags: &["tripod", "stable"],
            description: "Fluid video head with aluminum legs.",
        },
    )
    .await?;

    info!("Recording opening movements...");
    let movements = MovementService::new(db.clone(), Arc::new(sender));

    // Opening stock
    for (item, qty, to) in [
        (&camera, 5, zone_cameras.id),
        (&microphone, 8, zone_audio.id),
        (&switcher, 3, warehouse.id),
        (&cable, 50, warehouse.id),
        (&tripod, 10, zone_cameras.id),
    ] {
        movements
            .record(RecordMovementCommand {
                item_id: item.id,
                movement_type: MovementType::In,
                quantity: qty,
                from_location_id: None,
                to_location_id: Some(to),
                note: Some("Initial Purchase".into()),
                created_by: Some(admin.id),
            })
            .await?;
    }

    // A rental going out the door
    for (item, qty, from) in [(&camera, 2, zone_cameras.id), (&cable, 5, warehouse.id)] {
        movements
            .record(RecordMovementCommand {
                item_id: item.id,
                movement_type: MovementType::Out,
                quantity: qty,
                from_location_id: Some(from),
                to_location_id: Some(event_venue.id),
                note: Some("Sent to TechConf".into()),
                created_by: Some(manager.id),
            })
            .await?;
    }

    info!("Seed complete: 2 users, 4 locations, 5 items, 7 movements");
    Ok(())
}

struct ItemSeed<'a> {
    name: &'a str,
    brand: &'a str,
    model: &'a str,
    category: &'a str,
    min_stock_threshold: i32,
    tags: &'a [&'a str],
    description: &'a str,
}

async fn insert_location(
    db: &sea_orm::DatabaseConnection,
    name: &str,
    kind: LocationKind,
    parent_id: Option<Uuid>,
) -> anyhow::Result<location::Model> {
    Ok(location::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        kind: Set(kind),
        parent_id: Set(parent_id),
        address: Set(None),
        contact_info: Set(None),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await?)
}

async fn insert_item(
    db: &sea_orm::DatabaseConnection,
    seed: ItemSeed<'_>,
) -> anyhow::Result<item::Model> {
    Ok(item::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(seed.name.to_string()),
        brand: Set(seed.brand.to_string()),
        model: Set(seed.model.to_string()),
        category: Set(seed.category.to_string()),
        min_stock_threshold: Set(seed.min_stock_threshold),
        tags: Set(serde_json::json!(seed.tags)),
        image_url: Set(format!(
            "https://images.stockflow.pro/items/{}.jpg",
            seed.model.to_lowercase().replace(' ', "-")
        )),
        description: Set(seed.description.to_string()),
        current_stock: Set(0),
        status: Set(stockflow_api::ledger::derive_status(0, seed.min_stock_threshold)),
        created_at: Set(Utc::now()),
        updated_at: Set(Utc::now()),
    }
    .insert(db)
    .await?)
}
