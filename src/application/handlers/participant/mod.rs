//! Participant handlers.
//!
//! The gateway calls these in order for every connection: join once, relay
//! for each inbound frame, leave exactly once when the transport ends.

mod join_session;
mod leave_session;
mod relay_message;

pub use join_session::{JoinSessionCommand, JoinSessionHandler, JoinedSession};
pub use leave_session::{LeaveOutcome, LeaveSessionHandler};
pub use relay_message::{InboundFrame, RelayMessageCommand, RelayMessageHandler, RelayOutcome};
