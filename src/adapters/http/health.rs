//! Liveness endpoint.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::application::SessionRegistry;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub sessions: usize,
}

/// GET /health - Report liveness and the number of active sessions
pub async fn health(State(registry): State<Arc<SessionRegistry>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        sessions: registry.len().await,
    })
}

pub fn health_routes(registry: Arc<SessionRegistry>) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(registry)
}
