//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),

    #[error("Send timeout must be greater than zero")]
    InvalidSendTimeout,

    #[error("Outbound buffer must hold at least one frame")]
    InvalidOutboundBuffer,

    #[error("At least one session code attempt is required")]
    InvalidCodeAttempts,

    #[error("Default session name must not be blank")]
    BlankSessionName,
}
