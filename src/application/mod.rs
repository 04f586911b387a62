//! Application layer - Registries and Handlers.
//!
//! The registries own all live state: `SessionRegistry` maps codes to
//! sessions and each session owns a `ConnectionRegistry` for its roster.
//! Handlers orchestrate them for the HTTP and WebSocket adapters.

pub mod connection_registry;
pub mod handlers;
pub mod session_registry;

pub use connection_registry::{Admission, BroadcastReport, ConnectionRegistry, RosterSummary};
pub use session_registry::{RegistrySettings, Session, SessionRegistry, SessionSummary};

pub use handlers::{
    // Session administration
    CreateSessionCommand, CreateSessionHandler, CreateSessionResult,
    DeleteSessionCommand, DeleteSessionHandler, DeleteSessionResult,
    GetSessionHandler, GetSessionQuery, ListSessionsHandler,
    // Participant lifecycle
    InboundFrame, JoinSessionCommand, JoinSessionHandler, JoinedSession,
    LeaveOutcome, LeaveSessionHandler,
    RelayMessageCommand, RelayMessageHandler, RelayOutcome,
};
