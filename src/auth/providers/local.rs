use async_trait::async_trait;

use crate::{
    auth::{
        AuthSession, Claims, Registration, TokenBundle,
        jwt::{JwtKeys, decode_access_token, encode_token, make_access_claims},
        password::{hash_password, verify_password},
    },
    config::AuthConfig,
    db::dao::{DaoLayerError, IdentityClash, NewUser, RefreshTokenDao},
    db::entities::{refresh_token, user},
    error::AppError,
    services::user_service::UserService,
};

use super::AuthProvider;

const TOKEN_TYPE: &str = "bearer";

/// Password accounts stored in the application database, with JWT access
/// tokens and database-backed refresh tokens.
#[derive(Clone)]
pub struct LocalAuthProvider {
    users: UserService,
    refresh_tokens: RefreshTokenDao,
    jwt: JwtKeys,
    access_ttl_secs: usize,
    refresh_ttl_days: i64,
}

impl LocalAuthProvider {
    pub fn new(users: UserService, refresh_tokens: RefreshTokenDao, cfg: &AuthConfig) -> Self {
        Self {
            users,
            refresh_tokens,
            jwt: JwtKeys::from_secret(cfg.jwt_secret.as_bytes()),
            access_ttl_secs: (cfg.access_token_ttl_minutes as usize).saturating_mul(60),
            refresh_ttl_days: cfg.refresh_token_ttl_days,
        }
    }

    fn session(
        &self,
        user: user::Model,
        refresh: refresh_token::Model,
    ) -> Result<AuthSession, AppError> {
        let claims = make_access_claims(&user.id, self.access_ttl_secs);
        let access_token = encode_token(&self.jwt, &claims)?;
        Ok(AuthSession {
            user,
            tokens: TokenBundle {
                access_token,
                refresh_token: refresh.token,
                token_type: TOKEN_TYPE,
                expires_in: self.access_ttl_secs,
            },
        })
    }

    async fn open_session(&self, user: user::Model) -> Result<AuthSession, AppError> {
        let refresh = self
            .refresh_tokens
            .create_refresh_token(&user.id, self.refresh_ttl_days)
            .await?;
        self.session(user, refresh)
    }

    async fn ensure_available(&self, email: &str, username: &str) -> Result<(), AppError> {
        match self.users.find_clash(email, username).await? {
            Some(IdentityClash::Email) => Err(AppError::bad_request("Email already registered")),
            Some(IdentityClash::Username) => Err(AppError::bad_request("Username already taken")),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
    async fn register(&self, registration: Registration<'_>) -> Result<AuthSession, AppError> {
        let email = registration.email.trim();
        if email.is_empty() {
            return Err(AppError::bad_request("Email required"));
        }
        self.ensure_available(email, registration.username).await?;

        let password_hash = hash_password(registration.password)?;
        let user = self
            .users
            .create_user(NewUser {
                email,
                username: registration.username,
                password_hash: &password_hash,
                full_name: registration.full_name,
            })
            .await?;
        tracing::info!(user_id = %user.id, "user registered");

        self.open_session(user).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let rejected = || AppError::unauthorized("Incorrect email or password");

        let user = self
            .users
            .find_by_email(email.trim())
            .await?
            .ok_or_else(rejected)?;
        if !verify_password(password, &user.password_hash)? {
            return Err(rejected());
        }
        if !user.is_active {
            return Err(AppError::bad_request("Inactive user"));
        }

        self.users
            .set_last_login(&user.id, &chrono::Utc::now().fixed_offset())
            .await?;
        tracing::info!(user_id = %user.id, "user logged in");

        self.open_session(user).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AppError> {
        let current = self
            .refresh_tokens
            .find_active_by_token(refresh_token)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid refresh token"))?;
        if current.expires_at < chrono::Utc::now().fixed_offset() {
            return Err(AppError::unauthorized("Refresh token expired"));
        }

        let user = self
            .users
            .find_by_id(&current.user_id)
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let next = match self
            .refresh_tokens
            .rotate(&current, self.refresh_ttl_days)
            .await
        {
            Ok(next) => next,
            Err(DaoLayerError::NotFound { .. }) => {
                return Err(AppError::unauthorized("Invalid refresh token"));
            }
            Err(err) => return Err(err.into()),
        };
        tracing::debug!(user_id = %user.id, "refresh token rotated");

        self.session(user, next)
    }

    async fn revoke(&self, refresh_token: &str) -> Result<(), AppError> {
        if !self.refresh_tokens.revoke_token(refresh_token).await? {
            tracing::debug!("logout with unknown or already revoked refresh token");
        }
        Ok(())
    }

    async fn verify(&self, access_token: &str) -> Result<Claims, AppError> {
        decode_access_token(&self.jwt, access_token)
    }
}
