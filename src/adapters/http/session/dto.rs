//! HTTP DTOs for session endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::{DeleteSessionResult, SessionSummary};
use crate::domain::session::SessionCode;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Query parameters for creating a session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSessionQuery {
    #[serde(default)]
    pub name: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response carrying just a session code (create and delete).
#[derive(Debug, Clone, Serialize)]
pub struct SessionCodeResponse {
    pub code: String,
}

impl From<SessionCode> for SessionCodeResponse {
    fn from(code: SessionCode) -> Self {
        Self { code: code.into() }
    }
}

impl From<DeleteSessionResult> for SessionCodeResponse {
    fn from(result: DeleteSessionResult) -> Self {
        result.code.into()
    }
}

/// Single session lookup.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub code: String,
    pub name: String,
}

impl From<SessionSummary> for SessionResponse {
    fn from(summary: SessionSummary) -> Self {
        Self {
            code: summary.code.into(),
            name: summary.name,
        }
    }
}

/// Session entry for the administrative listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummaryResponse {
    pub code: String,
    pub name: String,
    pub player_count: usize,
    pub host_connected: bool,
    pub created_at: String,
}

impl From<SessionSummary> for SessionSummaryResponse {
    fn from(summary: SessionSummary) -> Self {
        Self {
            code: summary.code.into(),
            name: summary.name,
            player_count: summary.player_count,
            host_connected: summary.host_connected,
            created_at: summary.created_at.to_rfc3339(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            code: "SERVICE_UNAVAILABLE".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}
