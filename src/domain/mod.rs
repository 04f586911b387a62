//! Domain layer containing the broker's vocabulary and pure state.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, errors, state machine)
//! - `session` - Session codes, roles, and the per-session roster
//! - `protocol` - Frames exchanged with participants

pub mod foundation;
pub mod protocol;
pub mod session;
