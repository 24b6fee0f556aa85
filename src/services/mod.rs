pub mod aggregator;
pub mod auth_service;
pub mod board_service;
pub mod card_service;
pub mod context;
pub mod list_service;
pub mod ordering;
pub mod ownership;
pub mod user_service;

pub use context::ServiceContext;
