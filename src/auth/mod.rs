use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config;
use crate::database::models::client::AccountRole;

pub mod password;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account id the token is bound to
    pub sub: Uuid,
    pub email: String,
    pub role: AccountRole,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(sub: Uuid, email: String, role: AccountRole) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub,
            email,
            role,
            exp,
            iat: now.timestamp(),
        }
    }

    /// Seconds until this token expires, for login/signup responses.
    pub fn expires_in(&self) -> i64 {
        self.exp - self.iat
    }
}

#[derive(Debug)]
pub enum TokenError {
    TokenGeneration(String),
    InvalidSecret,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::TokenGeneration(msg) => write!(f, "token generation error: {}", msg),
            TokenError::InvalidSecret => write!(f, "signing key not configured"),
        }
    }
}

impl std::error::Error for TokenError {}

pub fn generate_token(claims: &Claims) -> Result<String, TokenError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(TokenError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| TokenError::TokenGeneration(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_claims_expire_in_the_future() {
        let claims = Claims::new(Uuid::new_v4(), "a@x.com".into(), AccountRole::Client);
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.expires_in(), claims.exp - claims.iat);
    }

    #[test]
    fn generates_a_three_part_token() {
        let claims = Claims::new(Uuid::new_v4(), "a@x.com".into(), AccountRole::Client);
        let token = generate_token(&claims).expect("dev config has a signing key");
        assert_eq!(token.split('.').count(), 3);
    }
}
