mod cors;
mod guards;
mod json_error;
mod panic;

pub use cors::cors_layer;
pub use guards::{CurrentUser, bearer_token};
pub use json_error::json_error_middleware;
pub use panic::catch_panic_layer;
pub(crate) use panic::panic_message;
