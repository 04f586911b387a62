//! Participant roles, player numbering and display accents.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Role requested by a client in the connect URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestedRole {
    Host,
    Player,
}

impl FromStr for RequestedRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "host" => Ok(RequestedRole::Host),
            "player" => Ok(RequestedRole::Player),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("expected 'host' or 'player', got '{}'", other),
            )),
        }
    }
}

impl fmt::Display for RequestedRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestedRole::Host => write!(f, "host"),
            RequestedRole::Player => write!(f, "player"),
        }
    }
}

/// Per-session player sequence number. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PlayerNumber(u32);

impl PlayerNumber {
    /// The first number handed out in a session.
    pub const FIRST: PlayerNumber = PlayerNumber(1);

    /// Creates a player number, rejecting zero (reserved for the host tag).
    pub fn new(value: u32) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// The number following this one.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for PlayerNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of an admitted connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Host,
    Player(PlayerNumber),
}

/// Sender tag stamped on frames relayed from the host.
pub const HOST_SENDER_TAG: u32 = 0;

impl Role {
    pub fn is_host(&self) -> bool {
        matches!(self, Role::Host)
    }

    pub fn player_number(&self) -> Option<PlayerNumber> {
        match self {
            Role::Host => None,
            Role::Player(n) => Some(*n),
        }
    }

    /// Value written into `playerNum` on frames this participant sends.
    pub fn sender_tag(&self) -> u32 {
        match self {
            Role::Host => HOST_SENDER_TAG,
            Role::Player(n) => n.get(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Host => write!(f, "host"),
            Role::Player(n) => write!(f, "player {}", n),
        }
    }
}

/// Accent colours handed to players in join order. Names are CSS colour
/// keywords so browser clients can use them directly.
pub const PALETTE: [&str; 8] = [
    "Blue",
    "BlueViolet",
    "Crimson",
    "DarkOrange",
    "ForestGreen",
    "Gold",
    "HotPink",
    "Teal",
];

/// Display accent assigned to a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Colour(&'static str);

impl Colour {
    /// Picks the accent for a player number. Wraps around once the
    /// palette is exhausted, so player 9 shares player 1's colour.
    pub fn for_player(number: PlayerNumber) -> Self {
        let index = (number.get() as usize - 1) % PALETTE.len();
        Self(PALETTE[index])
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of a single connection slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Transport handshake done, not yet admitted to a roster.
    Connecting,
    /// Admitted; receives broadcasts.
    Open,
    /// Rejected or removed.
    Closed,
}

impl StateMachine for ConnectionState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConnectionState::*;
        matches!(
            (self, target),
            (Connecting, Open) | (Connecting, Closed) | (Open, Closed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ConnectionState::*;
        match self {
            Connecting => vec![Open, Closed],
            Open => vec![Closed],
            Closed => vec![],
        }
    }
}
