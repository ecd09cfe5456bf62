pub mod assistant;
pub mod comments;
pub mod items;
pub mod locations;
pub mod movements;
pub mod reports;
pub mod users;

pub use assistant::AssistantService;
pub use comments::CommentService;
pub use items::ItemService;
pub use locations::LocationService;
pub use movements::MovementService;
pub use reports::ReportService;
pub use users::UserService;
