use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::AppConfig,
    db::DbPool,
    events::EventSender,
    services::{
        assistant::AssistantConfig, AssistantService, CommentService, ItemService,
        LocationService, MovementService, ReportService, UserService,
    },
};

pub mod assistant;
pub mod comments;
pub mod common;
pub mod items;
pub mod locations;
pub mod movements;
pub mod reports;
pub mod users;

/// Aggregate of the services used by HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub items: ItemService,
    pub locations: LocationService,
    pub movements: MovementService,
    pub comments: CommentService,
    pub users: UserService,
    pub assistant: AssistantService,
    pub reports: ReportService,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender, cfg: &AppConfig) -> Self {
        let users = UserService::new(db_pool.clone());
        let assistant = AssistantService::new(AssistantConfig {
            api_key: cfg.assistant_api_key.clone(),
            model: cfg.assistant_model.clone(),
            base_url: cfg.assistant_base_url.clone(),
            timeout: Duration::from_secs(cfg.assistant_timeout_secs),
        });

        Self {
            items: ItemService::new(db_pool.clone(), event_sender.clone()),
            locations: LocationService::new(db_pool.clone(), event_sender.clone()),
            movements: MovementService::new(db_pool.clone(), Arc::new(event_sender.clone())),
            comments: CommentService::new(db_pool.clone(), event_sender, users.clone()),
            users,
            assistant,
            reports: ReportService::new(db_pool),
        }
    }
}
