use chrono::{DateTime, FixedOffset};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set, sea_query::Expr,
};
use uuid::Uuid;

use super::{DaoBase, DaoLayerError, DaoResult};
use crate::db::entities::{prelude::User, user};

#[derive(Clone)]
pub struct UserDao {
    db: DatabaseConnection,
}

impl DaoBase for UserDao {
    type Entity = User;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

pub struct NewUser<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub full_name: Option<&'a str>,
}

/// Which unique identity field an existing account already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityClash {
    Email,
    Username,
}

impl UserDao {
    pub async fn find_by_email(&self, email: &str) -> DaoResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(DaoLayerError::Db)
    }

    /// One lookup for both unique fields; an email clash wins over a
    /// username clash.
    pub async fn find_clash(&self, email: &str, username: &str) -> DaoResult<Option<IdentityClash>> {
        let holders = User::find()
            .filter(
                Condition::any()
                    .add(user::Column::Email.eq(email))
                    .add(user::Column::Username.eq(username)),
            )
            .all(&self.db)
            .await
            .map_err(DaoLayerError::Db)?;

        if holders.iter().any(|holder| holder.email == email) {
            Ok(Some(IdentityClash::Email))
        } else if holders.iter().any(|holder| holder.username == username) {
            Ok(Some(IdentityClash::Username))
        } else {
            Ok(None)
        }
    }

    pub async fn create_user(&self, new: NewUser<'_>) -> DaoResult<user::Model> {
        let model = user::ActiveModel {
            email: Set(new.email.to_string()),
            username: Set(new.username.to_string()),
            password_hash: Set(new.password_hash.to_string()),
            full_name: Set(new.full_name.map(str::to_string)),
            is_active: Set(true),
            last_login_at: Set(None),
            ..Default::default()
        };
        self.create(model).await
    }

    /// Stamps the login time without loading the row first.
    pub async fn set_last_login(&self, id: &Uuid, at: &DateTime<FixedOffset>) -> DaoResult<()> {
        let result = User::update_many()
            .col_expr(user::Column::LastLoginAt, Expr::value(Some(*at)))
            .filter(user::Column::Id.eq(*id))
            .exec(&self.db)
            .await
            .map_err(DaoLayerError::Db)?;
        if result.rows_affected == 0 {
            return Err(Self::not_found(*id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use uuid::Uuid;

    use super::{IdentityClash, UserDao};
    use crate::db::{
        dao::{DaoBase, DaoLayerError},
        entities::user,
    };

    fn account(email: &str, username: &str) -> user::Model {
        let now = Utc::now().fixed_offset();
        user::Model {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            email: email.to_string(),
            username: username.to_string(),
            password_hash: "hash".to_string(),
            full_name: None,
            is_active: true,
            last_login_at: None,
        }
    }

    async fn clash_with(holders: Vec<user::Model>) -> Option<IdentityClash> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([holders])
            .into_connection();
        UserDao::new(&db)
            .find_clash("mulder@example.com", "mulder")
            .await
            .expect("query should succeed")
    }

    #[tokio::test]
    async fn clash_reports_the_field_already_held() {
        assert_eq!(clash_with(vec![]).await, None);
        assert_eq!(
            clash_with(vec![account("mulder@example.com", "fox")]).await,
            Some(IdentityClash::Email)
        );
        assert_eq!(
            clash_with(vec![account("fox@example.com", "mulder")]).await,
            Some(IdentityClash::Username)
        );
        assert_eq!(
            clash_with(vec![
                account("fox@example.com", "mulder"),
                account("mulder@example.com", "fox"),
            ])
            .await,
            Some(IdentityClash::Email)
        );
    }

    #[tokio::test]
    async fn find_by_email_returns_the_account() {
        let stored = account("skinner@example.com", "skinner");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored.clone()]])
            .into_connection();

        let found = UserDao::new(&db)
            .find_by_email("skinner@example.com")
            .await
            .expect("query should succeed");
        assert_eq!(found, Some(stored));
    }

    #[tokio::test]
    async fn set_last_login_on_missing_account_is_not_found() {
        let missing = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let err = UserDao::new(&db)
            .set_last_login(&missing, &Utc::now().fixed_offset())
            .await
            .expect_err("no row to stamp");
        assert!(matches!(
            err,
            DaoLayerError::NotFound { entity: "user", id } if id == missing
        ));
    }
}
