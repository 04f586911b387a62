//! Messages originated by the broker itself.

use serde::{Serialize, Serializer};

use super::Frame;
use crate::domain::session::{Colour, PlayerNumber};

/// Numeric status carried in the `code` field of every outbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageCode {
    /// Informational notice (joins, departures, game over).
    Info,
    /// Role assignment sent to a freshly admitted player.
    RoleAssigned,
    /// Event relayed from a participant.
    Relay,
    /// A player joined the session.
    PlayerJoined,
    /// Conflicting or malformed request.
    Conflict,
    /// Session does not exist.
    NotFound,
}

impl Serialize for MessageCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.as_u16())
    }
}

impl MessageCode {
    pub fn as_u16(&self) -> u16 {
        match self {
            MessageCode::Info => 200,
            MessageCode::RoleAssigned => 201,
            MessageCode::Relay => 202,
            MessageCode::PlayerJoined => 205,
            MessageCode::Conflict => 400,
            MessageCode::NotFound => 404,
        }
    }
}

/// Reason a connection attempt or frame was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RejectionKind {
    NotFound,
    HostConflict,
    MalformedFrame,
}

impl RejectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionKind::NotFound => "NotFound",
            RejectionKind::HostConflict => "HostConflict",
            RejectionKind::MalformedFrame => "MalformedFrame",
        }
    }

    fn code(&self) -> MessageCode {
        match self {
            RejectionKind::NotFound => MessageCode::NotFound,
            RejectionKind::HostConflict | RejectionKind::MalformedFrame => MessageCode::Conflict,
        }
    }
}

/// Broker-originated frame body. Absent fields are omitted on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerMessage {
    pub code: MessageCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<RejectionKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_num: Option<PlayerNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_player_num: Option<PlayerNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colour: Option<Colour>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ServerMessage {
    fn info(content: impl Into<String>) -> Self {
        Self {
            code: MessageCode::Info,
            kind: None,
            player_num: None,
            new_player_num: None,
            colour: None,
            content: Some(content.into()),
        }
    }

    /// `{code:201, playerNum, colour}` sent only to the new player.
    pub fn role_assigned(number: PlayerNumber, colour: Colour) -> Self {
        Self {
            code: MessageCode::RoleAssigned,
            kind: None,
            player_num: Some(number),
            new_player_num: None,
            colour: Some(colour),
            content: None,
        }
    }

    pub fn player_joined(number: PlayerNumber) -> Self {
        Self {
            code: MessageCode::PlayerJoined,
            new_player_num: Some(number),
            content: Some(format!("Player {} joined the game", number)),
            ..Self::info("")
        }
    }

    pub fn host_joined() -> Self {
        Self::info("Host joined the game")
    }

    pub fn player_left(number: PlayerNumber) -> Self {
        Self {
            player_num: Some(number),
            ..Self::info(format!("Player {} left the game", number))
        }
    }

    /// Terminal notice sent to every player when the host goes away.
    pub fn game_over() -> Self {
        Self::info("Host disconnected. The game is now over")
    }

    /// Terminal notice sent to everyone when a session is deleted.
    pub fn session_closed() -> Self {
        Self::info("The game was closed by an administrator")
    }

    pub fn rejection(kind: RejectionKind) -> Self {
        let content = match kind {
            RejectionKind::NotFound => "Game not found",
            RejectionKind::HostConflict => "This game already has a host",
            RejectionKind::MalformedFrame => "Malformed frame",
        };
        Self::rejection_with(kind, content)
    }

    pub fn rejection_with(kind: RejectionKind, content: impl Into<String>) -> Self {
        Self {
            code: kind.code(),
            kind: Some(kind),
            ..Self::info(content)
        }
    }

    /// Encodes the message once for delivery.
    ///
    /// Every field is a JSON scalar, so encoding only fails on a broken
    /// serializer; the bare status code is sent in that case.
    pub fn to_frame(&self) -> Frame {
        match serde_json::to_string(self) {
            Ok(text) => Frame::from(text),
            Err(e) => {
                tracing::error!(error = %e, code = self.code.as_u16(), "Failed to encode server message");
                Frame::from(format!(r#"{{"code":{}}}"#, self.code.as_u16()))
            }
        }
    }
}
