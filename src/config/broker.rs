//! Broker configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::RegistrySettings;

/// Session and connection tuning
#[derive(Debug, Clone, Deserialize)]
pub struct BrokerConfig {
    /// Upper bound on a single outbound write, in milliseconds
    #[serde(default = "default_send_timeout_ms")]
    pub send_timeout_ms: u64,

    /// Frames queued per connection before senders wait
    #[serde(default = "default_outbound_buffer")]
    pub outbound_buffer: usize,

    /// Code draws per create before giving up
    #[serde(default = "default_max_code_attempts")]
    pub max_code_attempts: u32,

    /// Name given to sessions created without one
    #[serde(default = "default_session_name")]
    pub default_session_name: String,
}

impl BrokerConfig {
    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }

    pub fn registry_settings(&self) -> RegistrySettings {
        RegistrySettings {
            max_code_attempts: self.max_code_attempts,
            default_session_name: self.default_session_name.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.send_timeout_ms == 0 {
            return Err(ValidationError::InvalidSendTimeout);
        }
        if self.outbound_buffer == 0 {
            return Err(ValidationError::InvalidOutboundBuffer);
        }
        if self.max_code_attempts == 0 {
            return Err(ValidationError::InvalidCodeAttempts);
        }
        if self.default_session_name.trim().is_empty() {
            return Err(ValidationError::BlankSessionName);
        }
        Ok(())
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            send_timeout_ms: default_send_timeout_ms(),
            outbound_buffer: default_outbound_buffer(),
            max_code_attempts: default_max_code_attempts(),
            default_session_name: default_session_name(),
        }
    }
}

fn default_send_timeout_ms() -> u64 {
    5000
}

fn default_outbound_buffer() -> usize {
    64
}

fn default_max_code_attempts() -> u32 {
    32
}

fn default_session_name() -> String {
    "Untitled game".to_string()
}
