//! Session domain module.
//!
//! Value objects and pure state for game sessions: the session code, the
//! participant roles with their player numbers and colours, and the roster
//! that enforces the single-host rule.

mod code;
mod errors;
mod role;
mod roster;

pub use code::{SessionCode, CODE_LENGTH};
pub use errors::SessionError;
pub use role::{
    Colour, ConnectionState, PlayerNumber, RequestedRole, Role, HOST_SENDER_TAG, PALETTE,
};
pub use roster::{Member, Roster, RosterError, Teardown};
