//! Health Route

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::store::DocumentStore;

use super::response::error_response;
use super::SharedJournal;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub boards: usize,
}

pub fn health_routes(journal: SharedJournal) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(journal)
}

async fn health_handler(State(journal): State<SharedJournal>) -> impl IntoResponse {
    match journal.store().board_count() {
        Ok(boards) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                boards,
            }),
        )
            .into_response(),
        Err(err) => error_response(StatusCode::SERVICE_UNAVAILABLE, err.to_string()).into_response(),
    }
}
