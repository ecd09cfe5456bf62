use crate::{
    db::DbPool,
    entities::user::{self, Entity as User, UserRole},
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

pub const DEFAULT_USER_EMAIL: &str = "admin@stockflow.pro";
pub const DEFAULT_USER_NAME: &str = "System Admin";

/// Read-mostly user access. Real identity and role enforcement is a planned
/// separate concern; until then writes are attributed to the first account,
/// provisioned here on demand.
#[derive(Clone)]
pub struct UserService {
    db_pool: Arc<DbPool>,
}

impl UserService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<user::Model>, ServiceError> {
        User::find()
            .order_by_asc(user::Column::Name)
            .all(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<user::Model, ServiceError> {
        User::find_by_id(id)
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", id)))
    }

    /// Returns the first user, creating the default admin when the table is
    /// empty.
    #[instrument(skip(self))]
    pub async fn ensure_default_user(&self) -> Result<user::Model, ServiceError> {
        if let Some(existing) = User::find()
            .one(&*self.db_pool)
            .await
            .map_err(ServiceError::DatabaseError)?
        {
            return Ok(existing);
        }

        // Two concurrent callers can race here; the unique email constraint
        // makes the loser fall back to a re-read.
        let created = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(DEFAULT_USER_NAME.to_string()),
            email: Set(DEFAULT_USER_EMAIL.to_string()),
            role: Set(UserRole::Admin),
            avatar: Set(None),
            created_at: Set(Utc::now()),
        }
        .insert(&*self.db_pool)
        .await;

        match created {
            Ok(model) => {
                info!(user_id = %model.id, "Provisioned default admin user");
                Ok(model)
            }
            Err(_) => User::find()
                .filter(user::Column::Email.eq(DEFAULT_USER_EMAIL))
                .one(&*self.db_pool)
                .await
                .map_err(ServiceError::DatabaseError)?
                .ok_or_else(|| {
                    ServiceError::InternalError("failed to provision default user".to_string())
                }),
        }
    }
}
