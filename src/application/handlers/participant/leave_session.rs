//! LeaveSessionHandler - Disconnect cleanup for one connection.

use std::sync::Arc;

use crate::application::connection_registry::Admission;
use crate::application::{Session, SessionRegistry};
use crate::domain::protocol::ServerMessage;
use crate::domain::session::{PlayerNumber, Role};

/// What the departure caused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// The host left; the session was torn down and removed.
    SessionEnded { players_notified: usize },
    /// A player left and the others were told.
    PlayerLeft(PlayerNumber),
    /// The connection had already been removed by a teardown.
    AlreadyGone,
}

pub struct LeaveSessionHandler {
    registry: Arc<SessionRegistry>,
}

impl LeaveSessionHandler {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, session: &Arc<Session>, admission: Admission) -> LeaveOutcome {
        let connections = session.connections();
        match admission.role {
            Role::Host => {
                let report = connections.disconnect_host().await;
                self.registry.delete_if_same(session).await;
                LeaveOutcome::SessionEnded {
                    players_notified: report.delivered,
                }
            }
            Role::Player(_) => match connections.disconnect_player(&admission.id).await {
                Some(number) => {
                    let report = connections
                        .broadcast(ServerMessage::player_left(number).to_frame())
                        .await;
                    connections.evict(&report.failed).await;
                    tracing::info!(
                        session = %session.code(),
                        connection = %admission.id,
                        player = number.get(),
                        "Player left"
                    );
                    LeaveOutcome::PlayerLeft(number)
                }
                None => LeaveOutcome::AlreadyGone,
            },
        }
    }
}
