pub mod jwt;
pub mod password;
pub mod providers;
mod types;

pub use types::{AuthSession, Claims, Registration, TokenBundle};
