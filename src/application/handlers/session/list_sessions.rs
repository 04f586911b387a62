//! ListSessionsHandler - Query handler for the administrative listing.

use std::sync::Arc;

use crate::application::{SessionRegistry, SessionSummary};

pub struct ListSessionsHandler {
    registry: Arc<SessionRegistry>,
}

impl ListSessionsHandler {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self) -> Vec<SessionSummary> {
        self.registry.list().await
    }
}
