use crate::{
    commands::Command,
    db::DbPool,
    entities::{
        item::{self, Entity as Item},
        location::Entity as Location,
        stock_movement::{self, MovementType},
        user::{self, Entity as User, UserRole},
        ItemStatus,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    ledger,
    metrics::{MOVEMENTS_RECORDED, MOVEMENT_FAILURES},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseTransaction, EntityTrait, Set, TransactionError, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

/// Records one stock movement and applies the ledger reduction to the item,
/// atomically. A reader never observes a movement without its stock update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordMovementCommand {
    pub item_id: Uuid,
    pub movement_type: MovementType,
    #[validate(range(min = 1, message = "must be a positive integer"))]
    pub quantity: i32,
    pub from_location_id: Option<Uuid>,
    pub to_location_id: Option<Uuid>,
    #[validate(length(max = 500, message = "at most 500 characters"))]
    pub note: Option<String>,
    /// Acting user. Absent until real authentication lands; falls back to
    /// the first user row, provisioned on demand.
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMovementResult {
    pub movement: stock_movement::Model,
    pub previous_stock: i32,
    pub new_stock: i32,
    pub previous_status: ItemStatus,
    pub new_status: ItemStatus,
}

#[async_trait::async_trait]
impl Command for RecordMovementCommand {
    type Result = RecordMovementResult;

    #[instrument(skip(self, db_pool, event_sender), fields(item_id = %self.item_id, movement_type = %self.movement_type))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        self.validate().map_err(|e| {
            MOVEMENT_FAILURES
                .with_label_values(&["validation_error"])
                .inc();
            ServiceError::from(e)
        })?;

        let result = self.record_in_db(db_pool.as_ref()).await?;

        self.log_and_trigger_events(&event_sender, &result).await?;
        MOVEMENTS_RECORDED.inc();
        Ok(result)
    }
}

impl RecordMovementCommand {
    async fn record_in_db(&self, db: &DbPool) -> Result<RecordMovementResult, ServiceError> {
        let cmd = self.clone();

        db.transaction::<_, RecordMovementResult, ServiceError>(|txn| {
            Box::pin(async move {
                // Reads inside the transaction so the reduction starts from a
                // level that reflects all previously committed movements.
                let item = Item::find_by_id(cmd.item_id)
                    .one(txn)
                    .await
                    .map_err(ServiceError::DatabaseError)?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!("Item {} not found", cmd.item_id))
                    })?;

                cmd.check_locations(txn).await?;

                let previous_stock = item.current_stock;
                let previous_status = item.status;

                if cmd.movement_type == MovementType::Out && cmd.quantity > previous_stock {
                    MOVEMENT_FAILURES
                        .with_label_values(&["insufficient_stock"])
                        .inc();
                    return Err(ServiceError::InsufficientStock(format!(
                        "cannot move out {} units of item {}; only {} in stock",
                        cmd.quantity, cmd.item_id, previous_stock
                    )));
                }

                let new_stock =
                    ledger::next_stock(previous_stock, cmd.movement_type, cmd.quantity);

                let created_by = cmd.resolve_actor(txn).await?;

                let movement = stock_movement::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    item_id: Set(cmd.item_id),
                    movement_type: Set(cmd.movement_type),
                    quantity: Set(cmd.quantity),
                    from_location_id: Set(cmd.from_location_id),
                    to_location_id: Set(cmd.to_location_id),
                    note: Set(cmd.note.clone()),
                    created_by: Set(created_by),
                    created_at: Set(Utc::now()),
                }
                .insert(txn)
                .await
                .map_err(ServiceError::DatabaseError)?;

                // A zero delta (TRANSFER) leaves the item row untouched, so an
                // operator-set MAINTENANCE status survives relocations.
                let new_status = if new_stock != previous_stock {
                    let derived = ledger::derive_status(new_stock, item.min_stock_threshold);
                    let mut active: item::ActiveModel = item.into();
                    active.current_stock = Set(new_stock);
                    active.status = Set(derived);
                    active.updated_at = Set(Utc::now());
                    active
                        .update(txn)
                        .await
                        .map_err(ServiceError::DatabaseError)?;
                    derived
                } else {
                    previous_status
                };

                Ok(RecordMovementResult {
                    movement,
                    previous_stock,
                    new_stock,
                    previous_status,
                    new_status,
                })
            })
        })
        .await
        .map_err(|e| {
            error!("Transaction failed for movement recording: {}", e);
            match e {
                TransactionError::Connection(db_err) => {
                    MOVEMENT_FAILURES.with_label_values(&["database_error"]).inc();
                    ServiceError::DatabaseError(db_err)
                }
                TransactionError::Transaction(service_err) => service_err,
            }
        })
    }

    /// Referenced locations must exist; the movement row keeps nullable
    /// references, so dangling ids are rejected up front.
    async fn check_locations(&self, txn: &DatabaseTransaction) -> Result<(), ServiceError> {
        for (field, id) in [
            ("from_location_id", self.from_location_id),
            ("to_location_id", self.to_location_id),
        ] {
            if let Some(id) = id {
                let found = Location::find_by_id(id)
                    .one(txn)
                    .await
                    .map_err(ServiceError::DatabaseError)?;
                if found.is_none() {
                    MOVEMENT_FAILURES
                        .with_label_values(&["validation_error"])
                        .inc();
                    return Err(ServiceError::ValidationError(format!(
                        "{}: {} does not reference a known location",
                        field, id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Resolve the acting user: the given id when present, otherwise the
    /// first user row, creating a default admin on an empty database.
    async fn resolve_actor(&self, txn: &DatabaseTransaction) -> Result<Uuid, ServiceError> {
        if let Some(id) = self.created_by {
            let found = User::find_by_id(id)
                .one(txn)
                .await
                .map_err(ServiceError::DatabaseError)?;
            return match found {
                Some(u) => Ok(u.id),
                None => Err(ServiceError::ValidationError(format!(
                    "created_by: {} does not reference a known user",
                    id
                ))),
            };
        }

        if let Some(u) = User::find()
            .one(txn)
            .await
            .map_err(ServiceError::DatabaseError)?
        {
            return Ok(u.id);
        }

        let admin = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set("System Admin".to_string()),
            email: Set("admin@stockflow.pro".to_string()),
            role: Set(UserRole::Admin),
            avatar: Set(None),
            created_at: Set(Utc::now()),
        }
        .insert(txn)
        .await
        .map_err(ServiceError::DatabaseError)?;

        Ok(admin.id)
    }

    async fn log_and_trigger_events(
        &self,
        event_sender: &EventSender,
        result: &RecordMovementResult,
    ) -> Result<(), ServiceError> {
        info!(
            movement_id = %result.movement.id,
            item_id = %self.item_id,
            movement_type = %self.movement_type,
            quantity = %self.quantity,
            previous_stock = %result.previous_stock,
            new_stock = %result.new_stock,
            "Stock movement recorded"
        );

        event_sender
            .send(Event::MovementRecorded {
                movement_id: result.movement.id,
                item_id: self.item_id,
                movement_type: self.movement_type,
                quantity: self.quantity,
                previous_stock: result.previous_stock,
                new_stock: result.new_stock,
            })
            .await
            .map_err(|e| {
                MOVEMENT_FAILURES.with_label_values(&["event_error"]).inc();
                ServiceError::EventError(format!(
                    "Failed to send event for recorded movement: {}",
                    e
                ))
            })?;

        if result.new_status != result.previous_status {
            event_sender
                .send(Event::ItemStatusChanged {
                    item_id: self.item_id,
                    old_status: result.previous_status,
                    new_status: result.new_status,
                })
                .await
                .map_err(|e| ServiceError::EventError(e.to_string()))?;
        }

        Ok(())
    }
}
