use crate::{
    auth::{AuthSession, Claims, Registration, providers::AuthProvider},
    error::AppError,
};

#[derive(Clone, Copy)]
pub struct AuthService<'a> {
    provider: &'a dyn AuthProvider,
}

impl<'a> AuthService<'a> {
    pub fn new(provider: &'a dyn AuthProvider) -> Self {
        Self { provider }
    }

    pub async fn register(&self, registration: Registration<'_>) -> Result<AuthSession, AppError> {
        self.provider.register(registration).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        self.provider.login(email, password).await
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AppError> {
        self.provider.refresh(refresh_token).await
    }

    /// Revokes the refresh token when one is supplied; access tokens simply
    /// expire.
    pub async fn logout(&self, refresh_token: Option<&str>) -> Result<(), AppError> {
        match refresh_token {
            Some(token) if !token.trim().is_empty() => self.provider.revoke(token).await,
            _ => Ok(()),
        }
    }

    pub async fn verify(&self, access_token: &str) -> Result<Claims, AppError> {
        self.provider.verify(access_token).await
    }
}
