//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the broker core to external systems:
//! - `codes` - Session code sources (random, scripted)
//! - `http` - REST endpoints for session administration
//! - `websocket` - Participant gateway and `ParticipantChannel` implementation

pub mod codes;
pub mod http;
pub mod websocket;

pub use codes::{FixedCodeSource, RandomCodeSource};
pub use websocket::{WebSocketChannel, WebSocketState};
