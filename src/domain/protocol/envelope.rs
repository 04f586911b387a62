//! Inbound participant envelopes.

use serde_json::{Map, Value};
use thiserror::Error;

use super::{Frame, MessageCode};
use crate::domain::session::Role;

/// Why an inbound frame could not be relayed.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("binary frames are not supported")]
    Binary,
}

/// A JSON object received from a participant.
///
/// The broker does not interpret the payload. It only stamps the sender
/// and makes sure a `code` is present before relaying.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope(Map<String, Value>);

impl Envelope {
    /// Parses a text frame. Anything but a JSON object is rejected.
    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(map) => Ok(Self(map)),
            Value::Array(_) => Err(ProtocolError::NotAnObject("array")),
            Value::String(_) => Err(ProtocolError::NotAnObject("string")),
            Value::Number(_) => Err(ProtocolError::NotAnObject("number")),
            Value::Bool(_) => Err(ProtocolError::NotAnObject("boolean")),
            Value::Null => Err(ProtocolError::NotAnObject("null")),
        }
    }

    /// Overwrites `playerNum` with the sender's tag and defaults `code`
    /// to the relay status. A client cannot impersonate another sender.
    pub fn stamp(mut self, sender: Role) -> Self {
        self.0
            .insert("playerNum".to_string(), Value::from(sender.sender_tag()));
        self.0
            .entry("code")
            .or_insert_with(|| Value::from(MessageCode::Relay.as_u16()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn into_frame(self) -> Frame {
        Frame::from(Value::Object(self.0))
    }
}
