//! WebSocket adapters for game participants.
//!
//! # Components
//!
//! - [`channel`] - Bounded outbound queue and writer implementing `ParticipantChannel`
//! - [`handler`] - Axum upgrade handler driving join, relay and leave

pub mod channel;
pub mod handler;

pub use channel::{OutboundQueue, WebSocketChannel};
pub use handler::{websocket_router, ws_handler, WebSocketState};
