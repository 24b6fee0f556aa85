use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use uuid::Uuid;

use crate::{
    db::entities::user, error::AppError, services::ServiceContext, state::AppState,
};

/// The authenticated, active user behind a bearer token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub user: user::Model,
}

pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::unauthorized("Missing/invalid Authorization header"))
}

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        if let Some(current) = parts.extensions.get::<CurrentUser>().cloned() {
            return Ok(current);
        }

        let token = bearer_token(&parts.headers)?;
        let services = ServiceContext::from_state(state.as_ref());
        let claims = services.auth(state.auth.as_ref()).verify(token).await?;
        let user_id = claims.user_id()?;

        let user = services
            .user()
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Could not validate credentials"))?;
        if !user.is_active {
            return Err(AppError::bad_request("Inactive user"));
        }

        let current = CurrentUser { id: user.id, user };
        parts.extensions.insert(current.clone());
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header};

    use super::bearer_token;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(value).expect("header value should be valid"),
        );
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(
            bearer_token(&headers("Bearer abc.def")).expect("token present"),
            "abc.def"
        );
    }

    #[test]
    fn rejects_missing_or_foreign_scheme() {
        assert!(bearer_token(&HeaderMap::new()).is_err());
        assert!(bearer_token(&headers("Basic dXNlcjpwdw==")).is_err());
        assert!(bearer_token(&headers("Bearer ")).is_err());
    }
}
