use crate::{
    db::DbPool,
    entities::item::{self, Entity as Item, ItemStatus},
    errors::ServiceError,
    events::{Event, EventSender},
    ledger,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use sea_orm::sea_query::Expr;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Service for managing catalog items.
#[derive(Clone)]
pub struct ItemService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateItemInput {
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "is required"))]
    pub brand: String,
    #[validate(length(min = 1, message = "is required"))]
    pub model: String,
    #[validate(length(min = 1, message = "is required"))]
    pub category: String,
    #[validate(range(min = 0, message = "must not be negative"))]
    #[serde(default)]
    pub min_stock_threshold: i32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub image_url: String,
    #[serde(default)]
    pub description: String,
}

/// Descriptive fields only. `current_stock` is derived from the ledger and
/// cannot be set here; `status` is accepted solely so operators can park an
/// item in MAINTENANCE.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateItemInput {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub brand: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub model: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category: Option<String>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub min_stock_threshold: Option<i32>,
    pub tags: Option<Vec<String>>,
    #[validate(url(message = "must be a valid URL"))]
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub status: Option<ItemStatus>,
}

impl ItemService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Lists items with pagination and optional name search.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        page: u64,
        limit: u64,
        search: Option<&str>,
    ) -> Result<(Vec<item::Model>, u64), ServiceError> {
        let db = &*self.db_pool;

        let mut query = Item::find().order_by_asc(item::Column::Name);
        if let Some(q) = search.filter(|q| !q.trim().is_empty()) {
            query = query.filter(item::Column::Name.contains(q.trim()));
        }

        let paginator = query.paginate(db, limit.max(1));
        let total = paginator.num_items().await.map_err(|e| {
            error!(error = %e, "Database error when counting items");
            ServiceError::DatabaseError(e)
        })?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| {
                error!(page = %page, limit = %limit, error = %e, "Database error when fetching items");
                ServiceError::DatabaseError(e)
            })?;

        Ok((items, total))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<item::Model, ServiceError> {
        Item::find_by_id(id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Item {} not found", id)))
    }

    /// Creates an item. Stock always starts at zero; the status follows from
    /// the ledger reduction of an empty history.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: CreateItemInput) -> Result<item::Model, ServiceError> {
        input.validate()?;

        let now = Utc::now();
        let model = item::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            brand: Set(input.brand),
            model: Set(input.model),
            category: Set(input.category),
            min_stock_threshold: Set(input.min_stock_threshold),
            tags: Set(serde_json::json!(input.tags)),
            image_url: Set(input.image_url),
            description: Set(input.description),
            current_stock: Set(0),
            status: Set(ledger::derive_status(0, input.min_stock_threshold)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db_pool)
        .await
        .map_err(ServiceError::DatabaseError)?;

        self.event_sender
            .send(Event::ItemCreated(model.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(model)
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateItemInput,
    ) -> Result<item::Model, ServiceError> {
        input.validate()?;

        let existing = self.get(id).await?;
        let mut active: item::ActiveModel = existing.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(brand) = input.brand {
            active.brand = Set(brand);
        }
        if let Some(model) = input.model {
            active.model = Set(model);
        }
        if let Some(category) = input.category {
            active.category = Set(category);
        }
        if let Some(min) = input.min_stock_threshold {
            active.min_stock_threshold = Set(min);
        }
        if let Some(tags) = input.tags {
            active.tags = Set(serde_json::json!(tags));
        }
        if let Some(url) = input.image_url {
            active.image_url = Set(url);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        active.updated_at = Set(Utc::now());

        let updated = active
            .update(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        self.event_sender
            .send(Event::ItemUpdated(updated.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        Item::delete_by_id(existing.id)
            .exec(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        self.event_sender
            .send(Event::ItemDeleted(id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(())
    }

    /// Items at or below their reorder threshold (includes out-of-stock).
    #[instrument(skip(self))]
    pub async fn low_stock(&self) -> Result<Vec<item::Model>, ServiceError> {
        Item::find()
            .filter(
                Expr::col(item::Column::CurrentStock)
                    .lte(Expr::col(item::Column::MinStockThreshold)),
            )
            .order_by_asc(item::Column::CurrentStock)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Full listing without pagination, for exports and the assistant
    /// snapshot.
    pub async fn all(&self) -> Result<Vec<item::Model>, ServiceError> {
        Item::find()
            .order_by_asc(item::Column::Name)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }
}
