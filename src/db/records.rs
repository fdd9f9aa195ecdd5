use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::StoredRecord;

pub const EQUIPMENT: &str = "equipment";
pub const MAINTENANCE: &str = "maintenance";

// `seq` is deliberately absent: the internal key stays inside the store.
const RECORD_COLUMNS: &str = "id, collection, doc, created_by, created_at, updated_at";

pub async fn insert(
    pool: &PgPool,
    collection: &str,
    doc: &serde_json::Value,
    created_by: &str,
) -> Result<StoredRecord, sqlx::Error> {
    sqlx::query_as::<_, StoredRecord>(&format!(
        "INSERT INTO records (id, collection, doc, created_by, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $5)
         RETURNING {RECORD_COLUMNS}"
    ))
    .bind(Uuid::now_v7())
    .bind(collection)
    .bind(doc)
    .bind(created_by)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

pub async fn list(pool: &PgPool, collection: &str) -> Result<Vec<StoredRecord>, sqlx::Error> {
    sqlx::query_as::<_, StoredRecord>(&format!(
        "SELECT {RECORD_COLUMNS} FROM records WHERE collection = $1 ORDER BY seq"
    ))
    .bind(collection)
    .fetch_all(pool)
    .await
}

pub async fn count(pool: &PgPool, collection: &str) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM records WHERE collection = $1")
        .bind(collection)
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

pub async fn count_by_status(
    pool: &PgPool,
    collection: &str,
    status: &str,
) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM records WHERE collection = $1 AND doc->>'status' = $2",
    )
    .bind(collection)
    .bind(status)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}
