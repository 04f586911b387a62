//! ParticipantChannel port - Outbound half of one participant connection.
//!
//! The registries never touch a socket directly. Each admitted connection is
//! represented by a channel that accepts pre-serialized frames and can be
//! told to close. The WebSocket adapter implements it over a bounded queue;
//! tests implement it with in-memory recorders.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::domain::foundation::ConnectionId;
use crate::domain::protocol::Frame;

/// Errors that can occur when writing to a participant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// The peer is gone or the channel was closed locally.
    #[error("channel closed")]
    Closed,

    /// The peer did not drain its queue in time.
    #[error("send timed out after {0:?}")]
    Timeout(Duration),
}

/// Port for delivering frames to a single participant.
///
/// # Contract
///
/// - `send` completes within a bounded time, returning `Timeout` rather than
///   blocking forever on a stalled peer.
/// - `close` is idempotent. Frames already accepted by `send` are delivered
///   before the transport closes.
/// - After `close`, every `send` returns `Closed`.
#[async_trait]
pub trait ParticipantChannel: Send + Sync {
    /// Identity of the connection this channel writes to.
    fn id(&self) -> ConnectionId;

    /// Queues one frame for delivery.
    async fn send(&self, frame: Frame) -> Result<(), ChannelError>;

    /// Requests transport closure after queued frames are flushed.
    fn close(&self);
}
