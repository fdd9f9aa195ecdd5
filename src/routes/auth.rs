use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::extractor::AuthUser;
use crate::auth::jwt::{self, Claims};
use crate::auth::password;
use crate::db;
use crate::error::AppError;
use crate::models::Account;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

pub async fn login(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<TokenResponse>, AppError> {
    let req = parse_login_body(&headers, &body)?;

    // First login against an empty account store self-provisions the
    // bootstrap account. The advisory lock keeps concurrent first logins
    // from creating it twice.
    let mut tx = state.pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock(1)")
        .execute(&mut *tx)
        .await?;

    let count = db::accounts::count_all(&mut *tx).await?;
    if count == 0 {
        if req.username != state.config.bootstrap_username
            || req.password != state.config.bootstrap_password
        {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;
        let account = db::accounts::create(&mut *tx, &req.username, &pw_hash, "admin").await?;
        tx.commit().await?;

        tracing::info!(username = %account.username, "Bootstrap account provisioned");
        return issue_token(&state, &account.username);
    }
    tx.commit().await?;

    let account = db::accounts::find_by_username(&state.pool, &req.username)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let valid =
        password::verify(&req.password, &account.password_hash).map_err(AppError::Internal)?;
    if !valid {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    issue_token(&state, &account.username)
}

pub async fn verify_token(auth: AuthUser) -> Json<serde_json::Value> {
    Json(json!({
        "username": auth.username(),
        "authenticated": true,
    }))
}

pub async fn me(auth: AuthUser) -> Json<Account> {
    Json(auth.account)
}

fn issue_token(state: &SharedState, username: &str) -> Result<Json<TokenResponse>, AppError> {
    let claims = Claims::new(username, state.config.token_ttl_minutes);
    let access_token =
        jwt::encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// Login bodies arrive as JSON or form-urlencoded, dispatched on Content-Type.
fn parse_login_body(headers: &HeaderMap, body: &[u8]) -> Result<LoginRequest, AppError> {
    let ct = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json");

    if ct.contains("application/x-www-form-urlencoded") {
        parse_login_form(body)
    } else {
        serde_json::from_slice(body)
            .map_err(|e| AppError::BadRequest(format!("Invalid login body: {e}")))
    }
}

fn parse_login_form(body: &[u8]) -> Result<LoginRequest, AppError> {
    let mut username = None;
    let mut password = None;
    for (key, value) in form_urlencoded::parse(body) {
        match key.as_ref() {
            "username" => username = Some(value.into_owned()),
            "password" => password = Some(value.into_owned()),
            _ => {}
        }
    }

    match (username, password) {
        (Some(username), Some(password)) => Ok(LoginRequest { username, password }),
        _ => Err(AppError::BadRequest(
            "Missing username or password".to_string(),
        )),
    }
}
