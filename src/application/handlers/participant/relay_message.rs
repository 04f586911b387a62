//! RelayMessageHandler - Stamps inbound frames and fans them out.

use crate::application::connection_registry::{Admission, BroadcastReport};
use crate::application::Session;
use crate::domain::protocol::{Envelope, ProtocolError, RejectionKind, ServerMessage};

/// A data frame received from a participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    Text(String),
    Binary,
}

pub struct RelayMessageCommand<'a> {
    pub session: &'a Session,
    pub sender: Admission,
    pub frame: InboundFrame,
}

#[derive(Debug)]
pub enum RelayOutcome {
    Relayed(BroadcastReport),
    /// Frame dropped; the sender was told why.
    Rejected(ProtocolError),
}

#[derive(Debug, Default)]
pub struct RelayMessageHandler;

impl RelayMessageHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(&self, cmd: RelayMessageCommand<'_>) -> RelayOutcome {
        let connections = cmd.session.connections();

        let parsed = match cmd.frame {
            InboundFrame::Text(text) => Envelope::parse(&text),
            InboundFrame::Binary => Err(ProtocolError::Binary),
        };

        match parsed {
            Ok(envelope) => {
                let frame = envelope.stamp(cmd.sender.role).into_frame();
                let report = connections.broadcast(frame).await;
                connections.evict(&report.failed).await;
                RelayOutcome::Relayed(report)
            }
            Err(err) => {
                tracing::debug!(
                    session = %cmd.session.code(),
                    connection = %cmd.sender.id,
                    error = %err,
                    "Dropping malformed frame"
                );
                let reply = ServerMessage::rejection_with(RejectionKind::MalformedFrame, err.to_string());
                if connections.send_to(&cmd.sender.id, reply.to_frame()).await.is_err() {
                    connections.evict(&[cmd.sender.id]).await;
                }
                RelayOutcome::Rejected(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{registry_with_code, RecordingChannel};
    use crate::application::SessionRegistry;
    use crate::domain::session::RequestedRole;
    use serde_json::json;
    use std::sync::Arc;

    struct Fixture {
        _registry: Arc<SessionRegistry>,
        session: Arc<Session>,
        host: Arc<RecordingChannel>,
        host_admission: Admission,
        player: Arc<RecordingChannel>,
        player_admission: Admission,
    }

    async fn fixture() -> Fixture {
        let registry = registry_with_code("abcd");
        let code = registry.create(None).await.unwrap();
        let session = registry.lookup(&code).await.unwrap();
        let host = RecordingChannel::new();
        let player = RecordingChannel::new();
        let host_admission = session.connections().connect(host.clone(), RequestedRole::Host).await.unwrap();
        let player_admission = session
            .connections()
            .connect(player.clone(), RequestedRole::Player)
            .await
            .unwrap();
        Fixture {
            _registry: registry,
            session,
            host,
            host_admission,
            player,
            player_admission,
        }
    }

    #[tokio::test]
    async fn player_frame_is_stamped_and_reaches_everyone() {
        let f = fixture().await;

        let outcome = RelayMessageHandler::new()
            .handle(RelayMessageCommand {
                session: &f.session,
                sender: f.player_admission,
                frame: InboundFrame::Text(r#"{"action":"jump","playerNum":7}"#.to_string()),
            })
            .await;

        assert!(matches!(outcome, RelayOutcome::Relayed(ref r) if r.delivered == 2));
        let expected = json!({"action": "jump", "code": 202, "playerNum": 1});
        assert_eq!(f.host.last(), Some(expected.clone()));
        assert_eq!(f.player.last(), Some(expected));
    }

    #[tokio::test]
    async fn host_frames_carry_sender_zero() {
        let f = fixture().await;

        RelayMessageHandler::new()
            .handle(RelayMessageCommand {
                session: &f.session,
                sender: f.host_admission,
                frame: InboundFrame::Text(r#"{"code":202,"state":"start"}"#.to_string()),
            })
            .await;

        assert_eq!(
            f.player.last(),
            Some(json!({"code": 202, "state": "start", "playerNum": 0}))
        );
    }

    #[tokio::test]
    async fn malformed_frame_is_answered_only_to_sender() {
        let f = fixture().await;
        let before = f.host.values().len();

        let outcome = RelayMessageHandler::new()
            .handle(RelayMessageCommand {
                session: &f.session,
                sender: f.player_admission,
                frame: InboundFrame::Text("[1,2,3]".to_string()),
            })
            .await;

        assert!(matches!(outcome, RelayOutcome::Rejected(ProtocolError::NotAnObject(_))));
        let reply = f.player.last().unwrap();
        assert_eq!(reply["code"], 400);
        assert_eq!(reply["kind"], "MalformedFrame");
        assert_eq!(f.host.values().len(), before);
        assert!(!f.player.is_closed());
    }

    #[tokio::test]
    async fn binary_frames_are_rejected() {
        let f = fixture().await;

        let outcome = RelayMessageHandler::new()
            .handle(RelayMessageCommand {
                session: &f.session,
                sender: f.host_admission,
                frame: InboundFrame::Binary,
            })
            .await;

        assert!(matches!(outcome, RelayOutcome::Rejected(ProtocolError::Binary)));
        assert_eq!(f.host.last().unwrap()["kind"], "MalformedFrame");
    }
}
