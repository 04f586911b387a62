//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{
    CreateSessionCommand, CreateSessionHandler, DeleteSessionCommand, DeleteSessionHandler,
    GetSessionHandler, GetSessionQuery, ListSessionsHandler, SessionRegistry,
};
use crate::domain::session::{SessionCode, SessionError};

use super::dto::{
    CreateSessionQuery, ErrorResponse, SessionCodeResponse, SessionResponse,
    SessionSummaryResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SessionHandlers {
    create_handler: Arc<CreateSessionHandler>,
    get_handler: Arc<GetSessionHandler>,
    list_handler: Arc<ListSessionsHandler>,
    delete_handler: Arc<DeleteSessionHandler>,
}

impl SessionHandlers {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self {
            create_handler: Arc::new(CreateSessionHandler::new(Arc::clone(&registry))),
            get_handler: Arc::new(GetSessionHandler::new(Arc::clone(&registry))),
            list_handler: Arc::new(ListSessionsHandler::new(Arc::clone(&registry))),
            delete_handler: Arc::new(DeleteSessionHandler::new(registry)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /game/new - Create a new session
pub async fn create_session(
    State(handlers): State<SessionHandlers>,
    Query(query): Query<CreateSessionQuery>,
) -> Response {
    let cmd = CreateSessionCommand { name: query.name };

    match handlers.create_handler.handle(cmd).await {
        Ok(result) => {
            let response = SessionCodeResponse::from(result.code);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// GET /game/:code - Get session details
pub async fn get_session(
    State(handlers): State<SessionHandlers>,
    Path(code): Path<String>,
) -> Response {
    let code = match SessionCode::parse(&code) {
        Ok(code) => code,
        Err(_) => return game_not_found(&code),
    };

    match handlers.get_handler.handle(GetSessionQuery { code }).await {
        Ok(summary) => {
            let response: SessionResponse = summary.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// GET /game - List active sessions
pub async fn list_sessions(State(handlers): State<SessionHandlers>) -> Response {
    let sessions: Vec<SessionSummaryResponse> = handlers
        .list_handler
        .handle()
        .await
        .into_iter()
        .map(Into::into)
        .collect();
    (StatusCode::OK, Json(sessions)).into_response()
}

/// DELETE /game/:code - Close a session and disconnect its participants
pub async fn delete_session(
    State(handlers): State<SessionHandlers>,
    Path(code): Path<String>,
) -> Response {
    let code = match SessionCode::parse(&code) {
        Ok(code) => code,
        Err(_) => return game_not_found(&code),
    };

    match handlers.delete_handler.handle(DeleteSessionCommand { code }).await {
        Ok(result) => {
            let response = SessionCodeResponse::from(result);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn game_not_found(code: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::not_found("Game", code)),
    )
        .into_response()
}

fn handle_session_error(error: SessionError) -> Response {
    match error {
        SessionError::NotFound(code) | SessionError::SessionClosed(code) => {
            game_not_found(code.as_str())
        }
        SessionError::HostConflict(code) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::bad_request(format!("Game {} already has a host", code))),
        )
            .into_response(),
        SessionError::CodeSpaceExhausted { attempts } => {
            tracing::error!(attempts, "Session creation failed: no free code");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::unavailable("No free game code, try again later")),
            )
                .into_response()
        }
        SessionError::ChannelClosed(id) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(format!("Connection {} closed", id))),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ConnectionId;

    fn code() -> SessionCode {
        SessionCode::parse("abcd").unwrap()
    }

    #[test]
    fn session_error_not_found_maps_to_404() {
        let response = handle_session_error(SessionError::NotFound(code()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn session_error_closed_maps_to_404() {
        let response = handle_session_error(SessionError::SessionClosed(code()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn code_space_exhausted_maps_to_503() {
        let response = handle_session_error(SessionError::CodeSpaceExhausted { attempts: 32 });
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn host_conflict_maps_to_409() {
        let response = handle_session_error(SessionError::HostConflict(code()));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn channel_closed_maps_to_500() {
        let response = handle_session_error(SessionError::ChannelClosed(ConnectionId::new()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
