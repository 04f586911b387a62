//! Session-specific error types.

use thiserror::Error;

use super::SessionCode;
use crate::domain::foundation::ConnectionId;
use crate::domain::protocol::RejectionKind;

/// Errors raised by session and roster operations.
///
/// None of these are fatal to the broker; each is scoped to one
/// connection or one session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No active session has this code.
    #[error("Session not found: {0}")]
    NotFound(SessionCode),

    /// A host is already connected to this session.
    #[error("Session {0} already has a host")]
    HostConflict(SessionCode),

    /// The session was torn down while the request was in flight.
    #[error("Session {0} has been closed")]
    SessionClosed(SessionCode),

    /// The participant's channel rejected a write.
    #[error("Channel closed for connection {0}")]
    ChannelClosed(ConnectionId),

    /// Every drawn code collided with an active session.
    #[error("No free session code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: u32 },
}

impl SessionError {
    /// Protocol-level rejection to send a connecting client, if any.
    ///
    /// A closed session is reported exactly like a missing one.
    pub fn rejection_kind(&self) -> Option<RejectionKind> {
        match self {
            SessionError::NotFound(_) | SessionError::SessionClosed(_) => {
                Some(RejectionKind::NotFound)
            }
            SessionError::HostConflict(_) => Some(RejectionKind::HostConflict),
            SessionError::ChannelClosed(_) | SessionError::CodeSpaceExhausted { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code() -> SessionCode {
        SessionCode::parse("abcd").unwrap()
    }

    #[test]
    fn not_found_displays_code() {
        let err = SessionError::NotFound(code());
        assert_eq!(err.to_string(), "Session not found: abcd");
    }

    #[test]
    fn closed_session_is_rejected_as_not_found() {
        assert_eq!(
            SessionError::SessionClosed(code()).rejection_kind(),
            Some(RejectionKind::NotFound)
        );
    }

    #[test]
    fn host_conflict_maps_to_host_conflict_rejection() {
        assert_eq!(
            SessionError::HostConflict(code()).rejection_kind(),
            Some(RejectionKind::HostConflict)
        );
    }

    #[test]
    fn channel_failures_have_no_rejection() {
        assert_eq!(
            SessionError::ChannelClosed(ConnectionId::new()).rejection_kind(),
            None
        );
    }
}
