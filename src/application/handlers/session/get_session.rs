//! GetSessionHandler - Query handler for retrieving session details.

use std::sync::Arc;

use crate::application::{SessionRegistry, SessionSummary};
use crate::domain::session::{SessionCode, SessionError};

/// Query to get a session by code.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub code: SessionCode,
}

/// Handler for retrieving session details.
pub struct GetSessionHandler {
    registry: Arc<SessionRegistry>,
}

impl GetSessionHandler {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<SessionSummary, SessionError> {
        let session = self.registry.lookup(&query.code).await?;
        Ok(session.summary().await)
    }
}
