pub mod local;

use async_trait::async_trait;

use crate::{
    auth::{AuthSession, Claims, Registration},
    error::AppError,
};

pub use local::LocalAuthProvider;

/// Credential handling behind the HTTP layer: password checks, token
/// issuance and verification, all bound to a user identity.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn register(&self, registration: Registration<'_>) -> Result<AuthSession, AppError>;
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AppError>;
    /// Exchanges a refresh token for a new session; the old token is revoked.
    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AppError>;
    async fn revoke(&self, refresh_token: &str) -> Result<(), AppError>;
    async fn verify(&self, access_token: &str) -> Result<Claims, AppError>;
}
