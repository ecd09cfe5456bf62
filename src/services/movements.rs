use crate::{
    commands::{Command, RecordMovementCommand, RecordMovementResult},
    db::DbPool,
    entities::stock_movement::{self, Entity as StockMovement},
    errors::ServiceError,
    events::EventSender,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Default feed size; matches what the activity view renders.
pub const DEFAULT_FEED_LIMIT: u64 = 50;

/// Service around the append-only movement ledger. All mutation goes through
/// [`RecordMovementCommand`]; there is deliberately no update or delete.
#[derive(Clone)]
pub struct MovementService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl MovementService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Records a movement and applies the ledger reduction atomically.
    #[instrument(skip(self, command))]
    pub async fn record(
        &self,
        command: RecordMovementCommand,
    ) -> Result<RecordMovementResult, ServiceError> {
        command
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await
    }

    /// Latest movements, newest first.
    #[instrument(skip(self))]
    pub async fn list_recent(
        &self,
        limit: u64,
    ) -> Result<Vec<stock_movement::Model>, ServiceError> {
        StockMovement::find()
            .order_by_desc(stock_movement::Column::CreatedAt)
            .limit(limit.max(1))
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Full history for one item, newest first.
    #[instrument(skip(self))]
    pub async fn list_for_item(
        &self,
        item_id: Uuid,
    ) -> Result<Vec<stock_movement::Model>, ServiceError> {
        StockMovement::find()
            .filter(stock_movement::Column::ItemId.eq(item_id))
            .order_by_desc(stock_movement::Column::CreatedAt)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<stock_movement::Model, ServiceError> {
        StockMovement::find_by_id(id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Movement {} not found", id)))
    }
}
