//! Pre-serialized outbound frame.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A JSON text frame ready to be written to any number of channels.
///
/// Serialized once per broadcast and shared by reference count, so
/// fan-out never re-encodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame(Arc<str>);

impl Frame {
    /// Renders a JSON value into a frame.
    pub fn from_value(value: &Value) -> Self {
        Self(Arc::from(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the frame back into a JSON value.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.0)
    }
}

impl From<Value> for Frame {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

impl From<String> for Frame {
    fn from(text: String) -> Self {
        Self(Arc::from(text))
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
