//! Shared test infrastructure for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use session_broker::adapters::FixedCodeSource;
use session_broker::application::{RegistrySettings, SessionRegistry};
use session_broker::domain::foundation::ConnectionId;
use session_broker::domain::protocol::Frame;
use session_broker::ports::{ChannelError, ParticipantChannel};

/// In-memory participant that records every frame it is sent.
pub struct RecordingChannel {
    id: ConnectionId,
    frames: Mutex<Vec<Frame>>,
    closed: AtomicBool,
}

impl RecordingChannel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            id: ConnectionId::new(),
            frames: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
        })
    }

    pub fn values(&self) -> Vec<Value> {
        self.frames
            .lock()
            .unwrap()
            .iter()
            .map(|f| f.to_value().unwrap())
            .collect()
    }

    pub fn last(&self) -> Option<Value> {
        self.values().pop()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ParticipantChannel for RecordingChannel {
    fn id(&self) -> ConnectionId {
        self.id
    }

    async fn send(&self, frame: Frame) -> Result<(), ChannelError> {
        if self.is_closed() {
            return Err(ChannelError::Closed);
        }
        self.frames.lock().unwrap().push(frame);
        Ok(())
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// Registry whose code source yields `codes` in order.
pub fn registry(codes: &[&str]) -> Arc<SessionRegistry> {
    Arc::new(SessionRegistry::new(
        Arc::new(FixedCodeSource::new(codes.iter().copied()).unwrap()),
        RegistrySettings::default(),
    ))
}
