use crate::{
    db::DbPool,
    entities::{
        comment::{self, CommentEntityType, Entity as Comment},
        item::Entity as Item,
        location::Entity as Location,
        stock_movement::Entity as StockMovement,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::users::UserService,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Service for free-form annotations on items, movements and locations.
#[derive(Clone)]
pub struct CommentService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
    users: UserService,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateCommentInput {
    pub entity_type: CommentEntityType,
    pub entity_id: Uuid,
    #[validate(length(min = 1, message = "is required"))]
    pub text: String,
    /// Acting user; defaults to the provisioned system user when absent.
    pub created_by: Option<Uuid>,
}

impl CommentService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender, users: UserService) -> Self {
        Self {
            db_pool,
            event_sender,
            users,
        }
    }

    /// Comments newest-first, optionally narrowed to one entity.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        entity: Option<(CommentEntityType, Uuid)>,
    ) -> Result<Vec<comment::Model>, ServiceError> {
        let mut query = Comment::find().order_by_desc(comment::Column::CreatedAt);
        if let Some((entity_type, entity_id)) = entity {
            query = query
                .filter(comment::Column::EntityType.eq(entity_type))
                .filter(comment::Column::EntityId.eq(entity_id));
        }
        query
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Creates a comment. The referenced entity must exist; there is no
    /// further structural invariant.
    #[instrument(skip(self, input), fields(entity_type = %input.entity_type, entity_id = %input.entity_id))]
    pub async fn create(&self, input: CreateCommentInput) -> Result<comment::Model, ServiceError> {
        input.validate()?;
        self.check_entity(input.entity_type, input.entity_id).await?;

        let author = match input.created_by {
            Some(id) => self.users.get(id).await?,
            None => self.users.ensure_default_user().await?,
        };

        let model = comment::ActiveModel {
            id: Set(Uuid::new_v4()),
            entity_type: Set(input.entity_type),
            entity_id: Set(input.entity_id),
            text: Set(input.text),
            author_name: Set(author.name.clone()),
            created_by: Set(author.id),
            created_at: Set(Utc::now()),
        }
        .insert(&*self.db_pool)
        .await
        .map_err(ServiceError::DatabaseError)?;

        self.event_sender
            .send(Event::CommentAdded {
                comment_id: model.id,
                entity_type: model.entity_type,
                entity_id: model.entity_id,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = Comment::find_by_id(id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Comment {} not found", id)))?;

        Comment::delete_by_id(existing.id)
            .exec(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?;

        self.event_sender
            .send(Event::CommentDeleted(id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(())
    }

    async fn check_entity(
        &self,
        entity_type: CommentEntityType,
        entity_id: Uuid,
    ) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let exists = match entity_type {
            CommentEntityType::Item => Item::find_by_id(entity_id)
                .one(db)
                .await
                .map_err(ServiceError::DatabaseError)?
                .is_some(),
            CommentEntityType::Movement => StockMovement::find_by_id(entity_id)
                .one(db)
                .await
                .map_err(ServiceError::DatabaseError)?
                .is_some(),
            CommentEntityType::Location => Location::find_by_id(entity_id)
                .one(db)
                .await
                .map_err(ServiceError::DatabaseError)?
                .is_some(),
        };

        if exists {
            Ok(())
        } else {
            Err(ServiceError::NotFound(format!(
                "{} {} not found",
                entity_type, entity_id
            )))
        }
    }
}
