use sea_orm::DatabaseConnection;

pub mod base;
pub mod base_traits;
pub mod board_dao;
pub mod card_dao;
pub mod error;
pub mod list_dao;
pub mod refresh_token_dao;
pub mod user_dao;

pub use base::DaoBase;
pub use base_traits::{
    HasCreatedAtColumn, HasIdActiveModel, OrderedActiveModel, OrderedEntity, OrderedModel,
    TimestampedActiveModel,
};
pub use board_dao::BoardDao;
pub use card_dao::{CardDao, NewCard};
pub use error::{DaoLayerError, DaoResult};
pub use list_dao::ListDao;
pub use refresh_token_dao::RefreshTokenDao;
pub use user_dao::{IdentityClash, NewUser, UserDao};

#[derive(Clone)]
pub struct DaoContext {
    db: DatabaseConnection,
}

impl DaoContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub fn user(&self) -> UserDao {
        DaoBase::new(&self.db)
    }

    pub fn refresh_token(&self) -> RefreshTokenDao {
        DaoBase::new(&self.db)
    }

    pub fn board(&self) -> BoardDao {
        DaoBase::new(&self.db)
    }

    pub fn list(&self) -> ListDao {
        DaoBase::new(&self.db)
    }

    pub fn card(&self) -> CardDao {
        DaoBase::new(&self.db)
    }
}
