//! WebSocket gateway for game participants.
//!
//! Handles the HTTP → WebSocket upgrade and manages the connection lifecycle:
//! 1. Validate the role segment (HTTP 400 before upgrading)
//! 2. Upgrade to WebSocket
//! 3. Join the session, or send a rejection and close
//! 4. Relay inbound frames until either side ends the connection
//! 5. Run departure cleanup exactly once

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use futures::StreamExt;

use crate::adapters::http::ErrorResponse;
use crate::application::{
    Admission, InboundFrame, JoinSessionCommand, JoinSessionHandler, JoinedSession,
    LeaveSessionHandler, RelayMessageCommand, RelayMessageHandler, Session, SessionRegistry,
};
use crate::config::BrokerConfig;
use crate::domain::foundation::{ConnectionId, StateMachine};
use crate::domain::protocol::{RejectionKind, ServerMessage};
use crate::domain::session::{ConnectionState, RequestedRole, SessionCode};
use crate::ports::ParticipantChannel;

use super::channel::WebSocketChannel;

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct WebSocketState {
    join: Arc<JoinSessionHandler>,
    relay: Arc<RelayMessageHandler>,
    leave: Arc<LeaveSessionHandler>,
    outbound_buffer: usize,
    send_timeout: Duration,
}

impl WebSocketState {
    pub fn new(registry: Arc<SessionRegistry>, broker: &BrokerConfig) -> Self {
        Self {
            join: Arc::new(JoinSessionHandler::new(Arc::clone(&registry))),
            relay: Arc::new(RelayMessageHandler::new()),
            leave: Arc::new(LeaveSessionHandler::new(registry)),
            outbound_buffer: broker.outbound_buffer,
            send_timeout: broker.send_timeout(),
        }
    }
}

/// Handle WebSocket upgrade requests from hosts and players.
///
/// Route: `GET /ws/:code/:role`
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path((code, role)): Path<(String, String)>,
    State(state): State<WebSocketState>,
) -> Response {
    let role: RequestedRole = match role.parse() {
        Ok(role) => role,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response();
        }
    };

    ws.on_upgrade(move |socket| handle_socket(socket, code, role, state))
}

/// Handle an established WebSocket connection.
///
/// Runs for the lifetime of the connection. Admission happens only after
/// the handshake, so every rejection reaches the client as a frame.
async fn handle_socket(socket: WebSocket, raw_code: String, role: RequestedRole, state: WebSocketState) {
    let (sink, mut receiver) = socket.split();

    let id = ConnectionId::new();
    let (channel, queue) = WebSocketChannel::new(id, state.outbound_buffer, state.send_timeout);
    let mut send_task = tokio::spawn(queue.pump(sink));
    let mut lifecycle = ConnectionState::Connecting;

    let participant: Arc<dyn ParticipantChannel> = channel.clone();
    let joined = match admit(&state, &raw_code, role, participant).await {
        Ok(joined) => joined,
        Err(rejection) => {
            advance(&mut lifecycle, ConnectionState::Closed, id);
            if let Some(kind) = rejection {
                tracing::debug!(connection = %id, code = %raw_code, role = %role, kind = kind.as_str(), "Connection rejected");
                if let Err(e) = channel.send(ServerMessage::rejection(kind).to_frame()).await {
                    tracing::debug!(connection = %id, error = %e, "Rejection frame not delivered");
                }
            }
            channel.close();
            if let Err(e) = send_task.await {
                tracing::debug!(connection = %id, error = %e, "Writer task ended abnormally");
            }
            return;
        }
    };
    advance(&mut lifecycle, ConnectionState::Open, id);

    let JoinedSession { session, admission } = joined;

    // Spawn task to relay inbound frames to the session
    let mut recv_task = {
        let session = Arc::clone(&session);
        let relay = Arc::clone(&state.relay);
        tokio::spawn(async move {
            while let Some(result) = receiver.next().await {
                let frame = match result {
                    Ok(Message::Text(text)) => InboundFrame::Text(text),
                    Ok(Message::Binary(_)) => InboundFrame::Binary,
                    Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => continue,
                    Ok(Message::Close(_)) => {
                        tracing::debug!(connection = %admission.id, "Client sent close frame");
                        break;
                    }
                    Err(e) => {
                        tracing::debug!(connection = %admission.id, "Receive error: {}", e);
                        break;
                    }
                };
                relay
                    .handle(RelayMessageCommand {
                        session: &session,
                        sender: admission,
                        frame,
                    })
                    .await;
            }
        })
    };

    // Wait for either task to finish
    let writer_done = tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
            true
        }
        _ = &mut recv_task => false,
    };

    depart(&state, &session, admission).await;
    advance(&mut lifecycle, ConnectionState::Closed, id);

    if !writer_done {
        channel.close();
        if tokio::time::timeout(state.send_timeout, send_task).await.is_err() {
            tracing::debug!(connection = %id, "Writer did not finish flushing");
        }
    }
}

/// Looks the session up and connects. `Err(None)` means the peer vanished
/// during admission and needs no rejection frame.
async fn admit(
    state: &WebSocketState,
    raw_code: &str,
    role: RequestedRole,
    channel: Arc<dyn ParticipantChannel>,
) -> Result<JoinedSession, Option<RejectionKind>> {
    let code = SessionCode::parse(raw_code).map_err(|_| Some(RejectionKind::NotFound))?;
    state
        .join
        .handle(JoinSessionCommand { code, role, channel })
        .await
        .map_err(|e| e.rejection_kind())
}

async fn depart(state: &WebSocketState, session: &Arc<Session>, admission: Admission) {
    let outcome = state.leave.handle(session, admission).await;
    tracing::debug!(
        session = %session.code(),
        connection = %admission.id,
        ?outcome,
        "Connection cleaned up"
    );
}

fn advance(lifecycle: &mut ConnectionState, target: ConnectionState, id: ConnectionId) {
    match lifecycle.transition_to(target) {
        Ok(next) => *lifecycle = next,
        Err(e) => tracing::warn!(connection = %id, error = %e, "Unexpected connection state change"),
    }
}

/// Create axum router for the WebSocket endpoint.
pub fn websocket_router(state: WebSocketState) -> axum::Router {
    use axum::routing::get;

    axum::Router::new()
        .route("/ws/:code/:role", get(ws_handler))
        .with_state(state)
}
