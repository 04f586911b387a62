//! HTTP routes for session endpoints.

use axum::{routing::get, Router};

use super::handlers::{create_session, delete_session, get_session, list_sessions, SessionHandlers};

/// Creates the session router with all endpoints.
pub fn session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/game", get(list_sessions))
        .route("/game/new", get(create_session))
        .route("/game/:code", get(get_session).delete(delete_session))
        .with_state(handlers)
}
