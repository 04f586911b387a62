//! JoinSessionHandler - Admits a connection and announces it.

use std::sync::Arc;

use crate::application::connection_registry::Admission;
use crate::application::{Session, SessionRegistry};
use crate::domain::protocol::ServerMessage;
use crate::domain::session::{RequestedRole, Role, SessionCode, SessionError};
use crate::ports::ParticipantChannel;

/// Command to admit one connection to a session.
pub struct JoinSessionCommand {
    pub code: SessionCode,
    pub role: RequestedRole,
    pub channel: Arc<dyn ParticipantChannel>,
}

/// A connection that is now part of a session.
pub struct JoinedSession {
    pub session: Arc<Session>,
    pub admission: Admission,
}

pub struct JoinSessionHandler {
    registry: Arc<SessionRegistry>,
}

impl JoinSessionHandler {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    /// Looks the session up, connects, then broadcasts the join notice.
    ///
    /// Errors leave the roster untouched; the caller turns them into a
    /// rejection frame.
    pub async fn handle(&self, cmd: JoinSessionCommand) -> Result<JoinedSession, SessionError> {
        let session = self.registry.lookup(&cmd.code).await?;
        let admission = session.connections().connect(cmd.channel, cmd.role).await?;

        let notice = match admission.role {
            Role::Host => ServerMessage::host_joined(),
            Role::Player(number) => ServerMessage::player_joined(number),
        };
        let report = session.connections().broadcast(notice.to_frame()).await;
        session.connections().evict(&report.failed).await;

        tracing::info!(
            session = %cmd.code,
            connection = %admission.id,
            role = %admission.role,
            "Participant joined"
        );

        Ok(JoinedSession { session, admission })
    }
}
