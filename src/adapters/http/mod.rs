//! HTTP adapters - REST API implementations.
//!
//! - `session` - Session administration (`/game`)
//! - `health` - Liveness check (`/health`)

pub mod health;
pub mod session;

// Re-export key types for convenience
pub use health::health_routes;
pub use session::{session_routes, ErrorResponse, SessionHandlers};
