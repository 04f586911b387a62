//! DeleteSessionHandler - Administrative session teardown.

use std::sync::Arc;

use crate::application::SessionRegistry;
use crate::domain::protocol::ServerMessage;
use crate::domain::session::{SessionCode, SessionError};

/// Command to close a session and disconnect everyone in it.
#[derive(Debug, Clone)]
pub struct DeleteSessionCommand {
    pub code: SessionCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteSessionResult {
    pub code: SessionCode,
    /// Participants that received the closure notice.
    pub notified: usize,
}

pub struct DeleteSessionHandler {
    registry: Arc<SessionRegistry>,
}

impl DeleteSessionHandler {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    /// Removes the session first so no new connection can find it, then
    /// notifies and closes every participant.
    pub async fn handle(&self, cmd: DeleteSessionCommand) -> Result<DeleteSessionResult, SessionError> {
        let session = self
            .registry
            .delete(&cmd.code)
            .await
            .ok_or_else(|| SessionError::NotFound(cmd.code.clone()))?;

        let report = session
            .connections()
            .close_all(ServerMessage::session_closed().to_frame())
            .await;

        tracing::info!(
            session = %cmd.code,
            notified = report.delivered,
            failed = report.failed.len(),
            "Session closed by administrator"
        );

        Ok(DeleteSessionResult {
            code: cmd.code,
            notified: report.delivered,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{registry_with_code, RecordingChannel};
    use crate::domain::session::RequestedRole;
    use serde_json::json;

    #[tokio::test]
    async fn notifies_everyone_and_removes_session() {
        let registry = registry_with_code("abcd");
        let code = registry.create(None).await.unwrap();
        let session = registry.lookup(&code).await.unwrap();
        let host = RecordingChannel::new();
        let player = RecordingChannel::new();
        session.connections().connect(host.clone(), RequestedRole::Host).await.unwrap();
        session.connections().connect(player.clone(), RequestedRole::Player).await.unwrap();

        let handler = DeleteSessionHandler::new(registry.clone());
        let result = handler.handle(DeleteSessionCommand { code: code.clone() }).await.unwrap();

        assert_eq!(result.notified, 2);
        let notice = json!({"code": 200, "content": "The game was closed by an administrator"});
        assert_eq!(host.last(), Some(notice.clone()));
        assert_eq!(player.last(), Some(notice));
        assert!(host.is_closed() && player.is_closed());
        assert!(registry.lookup(&code).await.is_err());
    }

    #[tokio::test]
    async fn deleting_twice_reports_not_found() {
        let registry = registry_with_code("abcd");
        let code = registry.create(None).await.unwrap();
        let handler = DeleteSessionHandler::new(registry);

        handler.handle(DeleteSessionCommand { code: code.clone() }).await.unwrap();
        let second = handler.handle(DeleteSessionCommand { code }).await;

        assert!(matches!(second, Err(SessionError::NotFound(_))));
    }
}
