pub mod auth;
pub mod records;
pub mod reports;
pub mod system;

use axum::Router;
use axum::routing::{get, post};

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/api/", get(system::welcome))
        .route("/api/login", post(auth::login))
        .route("/api/verify-token", get(auth::verify_token))
        .route("/api/me", get(auth::me))
        .route("/api/dashboard", get(system::dashboard))
        .route("/api/health", get(system::health))
        .route(
            "/api/equipamentos",
            get(records::list_equipment).post(records::create_equipment),
        )
        .route(
            "/api/manutencoes",
            get(records::list_maintenance).post(records::create_maintenance),
        )
        .route("/api/relatorios", get(reports::report))
        .route("/api/notificacoes", get(reports::notifications))
}
