//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the broker core and the outside world. Adapters implement these ports.
//!
//! - `ParticipantChannel` - Outbound frame delivery to one connection
//! - `CodeSource` - Candidate session codes

mod code_source;
mod participant_channel;

pub use code_source::CodeSource;
pub use participant_channel::{ChannelError, ParticipantChannel};
