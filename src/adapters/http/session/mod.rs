//! HTTP adapter for session endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateSessionQuery, ErrorResponse, SessionCodeResponse, SessionResponse,
    SessionSummaryResponse,
};
pub use handlers::SessionHandlers;
pub use routes::session_routes;
