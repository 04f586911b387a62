//! Application handlers.
//!
//! Command and query handlers that orchestrate the session registries.
//! `session` serves the administrative HTTP surface; `participant` drives
//! one connection through join, relay and leave, independent of transport.

pub mod participant;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use participant::{
    InboundFrame, JoinSessionCommand, JoinSessionHandler, JoinedSession, LeaveOutcome,
    LeaveSessionHandler, RelayMessageCommand, RelayMessageHandler, RelayOutcome,
};
pub use session::{
    CreateSessionCommand, CreateSessionHandler, CreateSessionResult, DeleteSessionCommand,
    DeleteSessionHandler, DeleteSessionResult, GetSessionHandler, GetSessionQuery,
    ListSessionsHandler,
};
