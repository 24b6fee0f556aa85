use chrono::{Duration, Utc};
use rand::{Rng, distributions::Alphanumeric};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

use super::{
    DaoBase, DaoLayerError, DaoResult,
    base_traits::{HasIdActiveModel, TimestampedActiveModel},
};
use crate::db::entities::refresh_token::{self, Entity as RefreshToken};

pub const REFRESH_TOKEN_LEN: usize = 48;

fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(REFRESH_TOKEN_LEN)
        .map(char::from)
        .collect()
}

fn fresh_token(user_id: Uuid, ttl_days: i64) -> refresh_token::ActiveModel {
    refresh_token::ActiveModel {
        token: Set(generate_token()),
        user_id: Set(user_id),
        expires_at: Set(Utc::now().fixed_offset() + Duration::days(ttl_days)),
        revoked: Set(false),
        ..Default::default()
    }
}

/// Marks `token` revoked if it is still live and returns how many rows flipped.
async fn revoke_live<C: ConnectionTrait>(conn: &C, token: &str) -> Result<u64, DbErr> {
    let result = RefreshToken::update_many()
        .col_expr(refresh_token::Column::Revoked, Expr::value(true))
        .col_expr(
            refresh_token::Column::UpdatedAt,
            Expr::value(Utc::now().fixed_offset()),
        )
        .filter(refresh_token::Column::Token.eq(token))
        .filter(refresh_token::Column::Revoked.eq(false))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

#[derive(Clone)]
pub struct RefreshTokenDao {
    db: DatabaseConnection,
}

impl DaoBase for RefreshTokenDao {
    type Entity = RefreshToken;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl RefreshTokenDao {
    pub async fn create_refresh_token(
        &self,
        user_id: &Uuid,
        ttl_days: i64,
    ) -> DaoResult<refresh_token::Model> {
        self.create(fresh_token(*user_id, ttl_days)).await
    }

    /// Unrevoked row for `token`. Expiry is left to the caller so it can
    /// report it separately.
    pub async fn find_active_by_token(
        &self,
        token: &str,
    ) -> DaoResult<Option<refresh_token::Model>> {
        RefreshToken::find()
            .filter(refresh_token::Column::Token.eq(token))
            .filter(refresh_token::Column::Revoked.eq(false))
            .one(&self.db)
            .await
            .map_err(DaoLayerError::Db)
    }

    /// Returns false when the token was unknown or already revoked.
    pub async fn revoke_token(&self, token: &str) -> DaoResult<bool> {
        let flipped = revoke_live(&self.db, token)
            .await
            .map_err(DaoLayerError::Db)?;
        Ok(flipped > 0)
    }

    /// Revokes `current` and issues its replacement in one transaction.
    /// A token that another request already rotated yields `NotFound`.
    pub async fn rotate(
        &self,
        current: &refresh_token::Model,
        ttl_days: i64,
    ) -> DaoResult<refresh_token::Model> {
        let txn = self.db.begin().await.map_err(DaoLayerError::Db)?;

        let flipped = revoke_live(&txn, &current.token)
            .await
            .map_err(DaoLayerError::Db)?;
        if flipped == 0 {
            return Err(Self::not_found(current.id));
        }

        let now = Utc::now().fixed_offset();
        let mut next = fresh_token(current.user_id, ttl_days);
        next.set_id(Uuid::new_v4());
        next.set_created_at(now);
        next.set_updated_at(now);
        let next = next.insert(&txn).await.map_err(DaoLayerError::Db)?;

        txn.commit().await.map_err(DaoLayerError::Db)?;
        Ok(next)
    }
}
