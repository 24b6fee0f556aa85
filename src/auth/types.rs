use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{db::entities::user, error::AppError};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user id
    pub exp: usize,  // expiry (unix)
    pub iat: usize,  // issued at
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::unauthorized("Invalid token subject"))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenBundle {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub expires_in: usize,
}

/// Issued tokens together with the user they were issued for.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: user::Model,
    pub tokens: TokenBundle,
}

#[derive(Debug, Clone, Copy)]
pub struct Registration<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub password: &'a str,
    pub full_name: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::Claims;

    #[test]
    fn user_id_parses_subject() {
        let id = Uuid::new_v4();
        let claims = Claims {
            sub: id.to_string(),
            exp: 100,
            iat: 10,
        };
        assert_eq!(claims.user_id().expect("subject is a uuid"), id);
    }

    #[test]
    fn user_id_rejects_non_uuid_subject() {
        let claims = Claims {
            sub: "alice@example.com".to_string(),
            exp: 100,
            iat: 10,
        };
        let err = claims.user_id().expect_err("subject is not a uuid");
        assert_eq!(err.message(), "Invalid token subject");
    }
}
