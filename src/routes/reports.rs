use axum::Json;
use axum::extract::State;
use chrono::Utc;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::reports::{self, Notification, Report};
use crate::state::SharedState;

/// Aggregated counts over both collections. Recomputed on every call.
pub async fn report(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Report>, AppError> {
    let equipment_total = db::records::count(&state.pool, db::records::EQUIPMENT).await?;
    let maintenance_total = db::records::count(&state.pool, db::records::MAINTENANCE).await?;
    let maintenance_done =
        db::records::count_by_status(&state.pool, db::records::MAINTENANCE, reports::DONE_STATUS)
            .await?;

    Ok(Json(Report {
        equipment_total,
        maintenance_total,
        maintenance_pending: maintenance_total - maintenance_done,
        maintenance_done,
        generated_at: Utc::now(),
        generated_by: auth.username().to_string(),
    }))
}

pub async fn notifications(
    _auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Notification>>, AppError> {
    let records = db::records::list(&state.pool, db::records::MAINTENANCE).await?;
    Ok(Json(reports::derive_notifications(&records, Utc::now())))
}
