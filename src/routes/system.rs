use axum::Json;
use axum::extract::State;
use chrono::Utc;
use serde_json::{Value, json};

use crate::auth::extractor::AuthUser;
use crate::state::SharedState;

pub async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Medical equipment maintenance API" }))
}

pub async fn dashboard(auth: AuthUser) -> Json<Value> {
    Json(json!({
        "message": format!("Welcome to the dashboard, {}!", auth.username()),
        "user": auth.username(),
        "timestamp": Utc::now(),
    }))
}

/// Store connectivity probe. A failing store degrades the payload but the
/// endpoint itself still answers 200.
pub async fn health(State(state): State<SharedState>) -> Json<Value> {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => Json(json!({ "status": "ok", "database": "connected" })),
        Err(e) => {
            tracing::warn!("Health check store error: {e}");
            Json(json!({
                "status": "ok",
                "database": "error",
                "error": e.to_string(),
            }))
        }
    }
}
