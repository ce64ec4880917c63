use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::error::{AppError, AppResult};

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub email: String,
    pub iat: usize, // issued at
    pub exp: usize, // expiration
    pub jti: String,
}

/// Signing material for access tokens
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Signs a token carrying `email`.
    pub fn issue(&self, email: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            email: email.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + self.ttl).timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Checks signature and expiry. Any failure is `Forbidden`: the caller
    /// did present a credential, it just isn't acceptable.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Forbidden(format!("Invalid token: {}", e)))
    }
}

/// Extracts the token from an `Authorization` header value.
///
/// A missing header, a non-UTF-8 value, a scheme other than `Bearer` or an
/// empty token are all `Unauthenticated`.
pub fn bearer_token(header: Option<&str>) -> AppResult<&str> {
    let value = header.ok_or_else(|| AppError::Unauthenticated("Missing authorization token".to_string()))?;

    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or_else(|| AppError::Unauthenticated("Invalid token format".to_string()))?;

    if token.is_empty() {
        return Err(AppError::Unauthenticated("Invalid token format".to_string()));
    }
    Ok(token)
}
