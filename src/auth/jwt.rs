use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use super::Claims;
use crate::error::AppError;

#[derive(Clone)]
pub struct JwtKeys {
    pub enc: EncodingKey,
    pub dec: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            enc: EncodingKey::from_secret(secret),
            dec: DecodingKey::from_secret(secret),
        }
    }
}

pub fn now_unix() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as usize)
        .unwrap_or(0)
}

pub fn encode_token(keys: &JwtKeys, claims: &Claims) -> Result<String, AppError> {
    let mut header = Header::new(Algorithm::HS256);
    header.typ = Some("JWT".into());

    encode(&header, claims, &keys.enc)
        .map_err(|err| AppError::internal(format!("Token encoding failed: {err}")))
}

pub fn make_access_claims(user_id: &uuid::Uuid, ttl_secs: usize) -> Claims {
    let iat = now_unix();
    Claims {
        sub: user_id.to_string(),
        iat,
        exp: iat + ttl_secs,
    }
}

pub fn decode_access_token(keys: &JwtKeys, token: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(token, &keys.dec, &validation)
        .map(|data| data.claims)
        .map_err(|_| AppError::unauthorized("Could not validate credentials"))
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::{JwtKeys, decode_access_token, encode_token, make_access_claims, now_unix};
    use crate::auth::Claims;

    #[test]
    fn makes_claims_with_expected_subject_and_ttl() {
        let user_id = Uuid::new_v4();
        let claims = make_access_claims(&user_id, 60);

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.exp.saturating_sub(claims.iat), 60);
    }

    #[test]
    fn encoded_token_decodes_with_same_secret() {
        let keys = JwtKeys::from_secret(b"unit-test-secret");
        let claims = make_access_claims(&Uuid::new_v4(), 600);
        let token = encode_token(&keys, &claims).expect("token should encode");

        let decoded = decode_access_token(&keys, &token).expect("token should decode");
        assert_eq!(decoded.sub, claims.sub);
        assert_eq!(decoded.exp, claims.exp);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let claims = make_access_claims(&Uuid::new_v4(), 600);
        let token = encode_token(&JwtKeys::from_secret(b"secret-a"), &claims)
            .expect("token should encode");

        let err = decode_access_token(&JwtKeys::from_secret(b"secret-b"), &token)
            .expect_err("signature should not verify");
        assert_eq!(err.message(), "Could not validate credentials");
    }

    #[test]
    fn rejects_expired_token() {
        let keys = JwtKeys::from_secret(b"unit-test-secret");
        let issued = now_unix() - 7_200;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: issued,
            exp: issued + 60,
        };
        let token = encode_token(&keys, &claims).expect("token should encode");

        assert!(decode_access_token(&keys, &token).is_err());
    }
}
