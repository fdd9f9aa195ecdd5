use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    #[serde(default)]
    pub sub: String,
    pub exp: i64,
}

impl Claims {
    pub fn new(username: &str, ttl_minutes: i64) -> Self {
        Self {
            sub: username.to_string(),
            exp: (Utc::now() + Duration::minutes(ttl_minutes)).timestamp(),
        }
    }
}

pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("JWT encode failed: {e}"))
}

/// Verify signature and expiry, then require a subject claim. A payload
/// that decodes but carries no subject is rejected separately from a bad
/// signature or expired token.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, String> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("JWT decode failed: {e}"))?;

    if claims.sub.is_empty() {
        return Err("JWT payload has no subject".to_string());
    }
    Ok(claims)
}
