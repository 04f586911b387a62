//! WebSocket implementation of `ParticipantChannel`.
//!
//! Each connection gets a bounded outbound queue drained by a dedicated
//! writer task. Registries only ever push onto the queue, so they never
//! touch the socket and a stalled peer costs at most one send timeout.

use async_trait::async_trait;
use axum::extract::ws::Message;
use futures::{Sink, SinkExt};
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Notify};

use crate::domain::foundation::ConnectionId;
use crate::domain::protocol::Frame;
use crate::ports::{ChannelError, ParticipantChannel};

/// Sending half handed to the registries.
pub struct WebSocketChannel {
    id: ConnectionId,
    outbound: mpsc::Sender<Frame>,
    closed: AtomicBool,
    close_signal: Arc<Notify>,
    send_timeout: Duration,
}

/// Receiving half owned by the writer task.
pub struct OutboundQueue {
    id: ConnectionId,
    frames: mpsc::Receiver<Frame>,
    close_signal: Arc<Notify>,
}

impl WebSocketChannel {
    pub fn new(id: ConnectionId, buffer: usize, send_timeout: Duration) -> (Arc<Self>, OutboundQueue) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        let close_signal = Arc::new(Notify::new());
        let channel = Arc::new(Self {
            id,
            outbound: tx,
            closed: AtomicBool::new(false),
            close_signal: Arc::clone(&close_signal),
            send_timeout,
        });
        let queue = OutboundQueue {
            id,
            frames: rx,
            close_signal,
        };
        (channel, queue)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ParticipantChannel for WebSocketChannel {
    fn id(&self) -> ConnectionId {
        self.id
    }

    async fn send(&self, frame: Frame) -> Result<(), ChannelError> {
        if self.is_closed() {
            return Err(ChannelError::Closed);
        }
        match tokio::time::timeout(self.send_timeout, self.outbound.send(frame)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_)) => Err(ChannelError::Closed),
            Err(_) => {
                tracing::warn!(connection = %self.id, timeout = ?self.send_timeout, "Outbound queue stalled");
                Err(ChannelError::Timeout(self.send_timeout))
            }
        }
    }

    fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.close_signal.notify_one();
        }
    }
}

impl OutboundQueue {
    /// Writes queued frames to `sink` until the channel is closed or the
    /// sink fails. On close, frames already queued are flushed before the
    /// close frame.
    pub async fn pump<S>(mut self, mut sink: S)
    where
        S: Sink<Message> + Unpin,
        S::Error: Display,
    {
        loop {
            tokio::select! {
                biased;
                next = self.frames.recv() => match next {
                    Some(frame) => {
                        if let Err(e) = sink.send(Message::Text(frame.to_string())).await {
                            tracing::debug!(connection = %self.id, "Send error, closing connection: {}", e);
                            return;
                        }
                    }
                    None => break,
                },
                _ = self.close_signal.notified() => {
                    self.frames.close();
                    while let Ok(frame) = self.frames.try_recv() {
                        if sink.send(Message::Text(frame.to_string())).await.is_err() {
                            return;
                        }
                    }
                    break;
                }
            }
        }

        if let Err(e) = sink.send(Message::Close(None)).await {
            tracing::trace!(connection = %self.id, "Close frame not delivered: {}", e);
        }
    }
}
