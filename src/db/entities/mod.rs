#[allow(unused_imports)]
pub mod prelude {
    pub use super::board::Entity as Board;
    pub use super::card::Entity as Card;
    pub use super::list::Entity as List;
    pub use super::refresh_token::Entity as RefreshToken;
    pub use super::user::Entity as User;
}

pub mod board;
pub mod card;
pub mod list;
pub mod refresh_token;
pub mod user;
