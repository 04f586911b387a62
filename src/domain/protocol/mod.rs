//! Wire protocol between the broker and its participants.
//!
//! Every outbound frame is a JSON object carrying a numeric `code`.
//! Inbound frames are JSON objects the broker only stamps and relays; their
//! payload belongs to the game clients.

mod envelope;
mod frame;
mod message;

pub use envelope::{Envelope, ProtocolError};
pub use frame::Frame;
pub use message::{MessageCode, RejectionKind, ServerMessage};
