use crate::{
    db::DbPool,
    entities::{
        item::{self, Entity as Item, ItemStatus},
        stock_movement::{self, Entity as StockMovement, MovementType},
    },
    errors::ServiceError,
};
use chrono::{Duration, Utc};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

/// Aggregates rendered on the dashboard.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    /// Units in stock summed over all items
    pub total_units: i64,
    /// Items currently at LOW status
    pub low_stock_items: u64,
    /// OUT movements recorded in the last 30 days
    pub active_loans: u64,
    /// Units in stock per category
    pub categories: Vec<CategoryCount>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryCount {
    pub name: String,
    pub units: i64,
}

/// Read-only reporting over the item table and movement ledger.
#[derive(Clone)]
pub struct ReportService {
    db_pool: Arc<DbPool>,
}

impl ReportService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Inventory snapshot as CSV, one row per item.
    #[instrument(skip(self))]
    pub async fn inventory_csv(&self) -> Result<String, ServiceError> {
        let items = Item::find()
            .order_by_asc(item::Column::Name)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let mut out = String::from(
            "ID,Name,Brand,Model,Category,Current Stock,Min Threshold,Status\n",
        );
        for i in &items {
            out.push_str(&format!(
                "{},{},{},{},{},{},{},{}\n",
                i.id,
                csv_quote(&i.name),
                csv_quote(&i.brand),
                csv_quote(&i.model),
                csv_quote(&i.category),
                i.current_stock,
                i.min_stock_threshold,
                i.status
            ));
        }
        Ok(out)
    }

    #[instrument(skip(self))]
    pub async fn dashboard(&self) -> Result<DashboardStats, ServiceError> {
        let db = &*self.db_pool;

        let items = Item::find()
            .all(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let total_units: i64 = items.iter().map(|i| i.current_stock as i64).sum();
        let low_stock_items = items
            .iter()
            .filter(|i| i.status == ItemStatus::Low)
            .count() as u64;

        let mut categories: BTreeMap<String, i64> = BTreeMap::new();
        for i in &items {
            *categories.entry(i.category.clone()).or_default() += i.current_stock as i64;
        }

        let thirty_days_ago = Utc::now() - Duration::days(30);
        let active_loans = StockMovement::find()
            .filter(stock_movement::Column::MovementType.eq(MovementType::Out))
            .filter(stock_movement::Column::CreatedAt.gt(thirty_days_ago))
            .count(db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        Ok(DashboardStats {
            total_units,
            low_stock_items,
            active_loans,
            categories: categories
                .into_iter()
                .map(|(name, units)| CategoryCount { name, units })
                .collect(),
        })
    }
}

/// Minimal CSV quoting: wrap in double quotes, escape embedded quotes.
fn csv_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
