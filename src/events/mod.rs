use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::entities::{CommentEntityType, ItemStatus, MovementType};

/// Handle used by services and commands to publish domain events.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously.
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Domain events emitted after successful state changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Item lifecycle
    ItemCreated(Uuid),
    ItemUpdated(Uuid),
    ItemDeleted(Uuid),

    // Ledger
    MovementRecorded {
        movement_id: Uuid,
        item_id: Uuid,
        movement_type: MovementType,
        quantity: i32,
        previous_stock: i32,
        new_stock: i32,
    },
    ItemStatusChanged {
        item_id: Uuid,
        old_status: ItemStatus,
        new_status: ItemStatus,
    },

    // Locations
    LocationCreated(Uuid),
    LocationDeleted(Uuid),

    // Comments
    CommentAdded {
        comment_id: Uuid,
        entity_type: CommentEntityType,
        entity_id: Uuid,
    },
    CommentDeleted(Uuid),
}

/// Background consumer draining the event channel. Today this logs; it is
/// the single place to attach notifications or sync targets later.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::MovementRecorded {
                movement_id,
                item_id,
                movement_type,
                quantity,
                previous_stock,
                new_stock,
            } => {
                info!(
                    movement_id = %movement_id,
                    item_id = %item_id,
                    movement_type = %movement_type,
                    quantity = %quantity,
                    previous_stock = %previous_stock,
                    new_stock = %new_stock,
                    "Movement recorded"
                );
            }
            Event::ItemStatusChanged {
                item_id,
                old_status,
                new_status,
            } => {
                if *new_status == ItemStatus::Low || *new_status == ItemStatus::Unavailable {
                    warn!(
                        item_id = %item_id,
                        old_status = %old_status,
                        new_status = %new_status,
                        "Item fell below stock threshold"
                    );
                } else {
                    info!(
                        item_id = %item_id,
                        old_status = %old_status,
                        new_status = %new_status,
                        "Item status changed"
                    );
                }
            }
            other => {
                info!("Received event: {:?}", other);
            }
        }
    }

    info!("Event processing loop stopped");
}
