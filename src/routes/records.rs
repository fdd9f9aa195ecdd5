use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::Value;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::StoredRecord;
use crate::state::SharedState;

pub async fn list_equipment(
    _auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Value>>, AppError> {
    list_collection(&state, db::records::EQUIPMENT).await
}

pub async fn create_equipment(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    create_in_collection(&state, db::records::EQUIPMENT, auth.username(), body).await
}

pub async fn list_maintenance(
    _auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Value>>, AppError> {
    list_collection(&state, db::records::MAINTENANCE).await
}

pub async fn create_maintenance(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    create_in_collection(&state, db::records::MAINTENANCE, auth.username(), body).await
}

async fn list_collection(
    state: &SharedState,
    collection: &str,
) -> Result<Json<Vec<Value>>, AppError> {
    let records = db::records::list(&state.pool, collection).await?;
    Ok(Json(
        records
            .into_iter()
            .map(StoredRecord::into_document)
            .collect(),
    ))
}

async fn create_in_collection(
    state: &SharedState,
    collection: &str,
    actor: &str,
    body: Value,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if !body.is_object() {
        return Err(AppError::BadRequest(
            "Request body must be a JSON object".to_string(),
        ));
    }

    let record = db::records::insert(&state.pool, collection, &body, actor).await?;
    Ok((StatusCode::CREATED, Json(record.into_document())))
}
