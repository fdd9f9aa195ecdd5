use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::jwt;
use crate::db;
use crate::error::AppError;
use crate::models::Account;
use crate::state::SharedState;

/// The authenticated account, resolved from the bearer token's subject.
/// Extraction fails if the token is missing, invalid, or expired, if no
/// account matches the subject, or if the account has been deactivated.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub account: Account,
}

impl AuthUser {
    pub fn username(&self) -> &str {
        &self.account.username
    }
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .ok_or_else(|| AppError::Unauthorized("Missing authentication token".to_string()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Invalid authorization header".to_string()))?;

        let claims = jwt::decode_token(token, &state.config.jwt_secret)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        let account = db::accounts::find_by_username(&state.pool, &claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Unknown account".to_string()))?;

        if !account.active {
            return Err(AppError::Unauthorized("Account is disabled".to_string()));
        }

        Ok(AuthUser { account })
    }
}
