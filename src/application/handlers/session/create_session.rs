//! CreateSessionHandler - Command handler for creating new sessions.

use std::sync::Arc;

use crate::application::SessionRegistry;
use crate::domain::session::{SessionCode, SessionError};

/// Command to create a new session.
#[derive(Debug, Clone, Default)]
pub struct CreateSessionCommand {
    /// Display name; the configured default is used when absent or blank.
    pub name: Option<String>,
}

/// Result of successful session creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSessionResult {
    pub code: SessionCode,
}

/// Handler for creating sessions.
pub struct CreateSessionHandler {
    registry: Arc<SessionRegistry>,
}

impl CreateSessionHandler {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, cmd: CreateSessionCommand) -> Result<CreateSessionResult, SessionError> {
        let code = self.registry.create(cmd.name).await?;
        Ok(CreateSessionResult { code })
    }
}
