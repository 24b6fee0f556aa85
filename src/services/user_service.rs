use uuid::Uuid;

use crate::{
    db::dao::{DaoBase, IdentityClash, NewUser, UserDao},
    db::entities::user,
    error::AppError,
};

#[derive(Clone)]
pub struct UserService {
    user_dao: UserDao,
}

impl UserService {
    pub fn new(user_dao: UserDao) -> Self {
        Self { user_dao }
    }

    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<user::Model>, AppError> {
        Ok(self.user_dao.find_optional(*id).await?)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, AppError> {
        Ok(self.user_dao.find_by_email(email).await?)
    }

    pub async fn find_clash(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<IdentityClash>, AppError> {
        Ok(self.user_dao.find_clash(email, username).await?)
    }

    pub async fn create_user(&self, new: NewUser<'_>) -> Result<user::Model, AppError> {
        Ok(self.user_dao.create_user(new).await?)
    }

    pub async fn set_last_login(
        &self,
        user_id: &Uuid,
        last_login: &chrono::DateTime<chrono::FixedOffset>,
    ) -> Result<(), AppError> {
        Ok(self.user_dao.set_last_login(user_id, last_login).await?)
    }
}
