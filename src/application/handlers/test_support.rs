//! Shared doubles for handler tests.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::adapters::codes::FixedCodeSource;
use crate::application::{RegistrySettings, SessionRegistry};
use crate::domain::foundation::ConnectionId;
use crate::domain::protocol::Frame;
use crate::ports::{ChannelError, ParticipantChannel};

pub struct RecordingChannel {
    pub id: ConnectionId,
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

pub fn registry_with_code(code: &'static str) -> Arc<SessionRegistry> {
    Arc::new(SessionRegistry::new(
        Arc::new(FixedCodeSource::new([code]).unwrap()),
        RegistrySettings::default(),
    ))
}
