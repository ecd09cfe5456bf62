use crate::{
    db::DbPool,
    entities::location::{self, Entity as Location, LocationKind},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Service for managing storage and client locations.
#[derive(Clone)]
pub struct LocationService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateLocationInput {
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,
    pub kind: LocationKind,
    /// Optional parent forming the storage tree; must reference an existing
    /// location.
    pub parent_id: Option<Uuid>,
    pub address: Option<String>,
    pub contact_info: Option<String>,
}

impl LocationService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<location::Model>, ServiceError> {
        Location::find()
            .order_by_asc(location::Column::Name)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<location::Model, ServiceError> {
        Location::find_by_id(id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Location {} not found", id)))
    }

    #[instrument(skip(self, input), fields(name = %input.name, kind = %input.kind))]
    pub async fn create(
        &self,
        input: CreateLocationInput,
    ) -> Result<location::Model, ServiceError> {
        input.validate()?;

        if let Some(parent_id) = input.parent_id {
            let parent = Location::find_by_id(parent_id)
                .one(&*self.db_pool)
                .await
                .map_err(ServiceError::DatabaseError)?;
            if parent.is_none() {
                return Err(ServiceError::ValidationError(format!(
                    "parent_id: {} does not reference a known location",
                    parent_id
                )));
            }
        }

        let model = location::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            kind: Set(input.kind),
            parent_id: Set(input.parent_id),
            address: Set(input.address),
            contact_info: Set(input.contact_info),
            created_at: Set(Utc::now()),
        }
        .insert(&*self.db_pool)
        .await
        .map_err(ServiceError::DatabaseError)?;

        self.event_sender
            .send(Event::LocationCreated(model.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        Location::delete_by_id(existing.id)
            .exec(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        self.event_sender
            .send(Event::LocationDeleted(id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(())
    }
}
