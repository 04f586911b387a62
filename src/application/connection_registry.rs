//! ConnectionRegistry - Live roster of one session plus fan-out.
//!
//! The roster lives behind a per-session `tokio::sync::Mutex`. Every
//! operation that writes to channels copies what it needs under the lock,
//! releases it, and only then performs I/O, so a slow participant can never
//! stall admissions or other broadcasts.

use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::ConnectionId;
use crate::domain::protocol::{Frame, ServerMessage};
use crate::domain::session::{
    Colour, Member, PlayerNumber, RequestedRole, Role, Roster, RosterError, SessionCode,
    SessionError,
};
use crate::ports::ParticipantChannel;

type Channel = Arc<dyn ParticipantChannel>;

/// Outcome of a successful connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    pub id: ConnectionId,
    pub role: Role,
}

/// Result of delivering one frame to many recipients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: usize,
    pub failed: Vec<ConnectionId>,
}

impl BroadcastReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Point-in-time view of a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterSummary {
    pub player_count: usize,
    pub host_connected: bool,
}

/// Connections of a single session.
pub struct ConnectionRegistry {
    code: SessionCode,
    roster: Mutex<Roster<Channel>>,
}

impl ConnectionRegistry {
    pub fn new(code: SessionCode) -> Self {
        Self {
            code,
            roster: Mutex::new(Roster::new()),
        }
    }

    pub fn code(&self) -> &SessionCode {
        &self.code
    }

    /// Admits a channel under the requested role.
    ///
    /// Players are sent their role assignment before this returns and only
    /// join broadcasts once that write has succeeded, so the assignment is
    /// always their first frame. If the write fails the player is removed
    /// again.
    pub async fn connect(
        &self,
        channel: Channel,
        requested: RequestedRole,
    ) -> Result<Admission, SessionError> {
        let id = channel.id();
        let role = {
            let mut roster = self.roster.lock().await;
            roster
                .admit(id, requested, Arc::clone(&channel))
                .map_err(|err| match err {
                    RosterError::HostAlreadyConnected => SessionError::HostConflict(self.code.clone()),
                    RosterError::Closed => SessionError::SessionClosed(self.code.clone()),
                })?
        };

        if let Role::Player(number) = role {
            let assignment = ServerMessage::role_assigned(number, Colour::for_player(number));
            if let Err(err) = channel.send(assignment.to_frame()).await {
                tracing::warn!(
                    session = %self.code,
                    connection = %id,
                    player = number.get(),
                    error = %err,
                    "Role assignment failed, removing player"
                );
                self.roster.lock().await.remove_player(&id);
                return Err(SessionError::ChannelClosed(id));
            }
            if !self.roster.lock().await.activate(&id) {
                tracing::debug!(session = %self.code, connection = %id, "Roster torn down during admission");
                return Err(SessionError::SessionClosed(self.code.clone()));
            }
        }

        tracing::debug!(session = %self.code, connection = %id, role = %role, "Connection admitted");
        Ok(Admission { id, role })
    }

    /// Removes a player. Returns its number if it was still registered.
    pub async fn disconnect_player(&self, id: &ConnectionId) -> Option<PlayerNumber> {
        let removed = self.roster.lock().await.remove_player(id);
        if let Some(number) = removed {
            tracing::debug!(session = %self.code, connection = %id, player = number.get(), "Player removed");
        }
        removed
    }

    /// Tears the roster down after the host leaves.
    ///
    /// Every player still present gets the game-over notice and is closed.
    /// No connect succeeds on this registry afterwards.
    pub async fn disconnect_host(&self) -> BroadcastReport {
        let (already_closed, teardown) = {
            let mut roster = self.roster.lock().await;
            (roster.is_closed(), roster.close())
        };
        if already_closed {
            tracing::debug!(session = %self.code, "Host cleanup after teardown, nothing left to close");
            return BroadcastReport::default();
        }
        let report = deliver_and_close(&teardown.players, &ServerMessage::game_over().to_frame()).await;
        if let Some(host) = &teardown.host {
            host.handle.close();
        }
        tracing::info!(
            session = %self.code,
            players = teardown.players.len(),
            failed = report.failed.len(),
            "Host disconnected, session torn down"
        );
        report
    }

    /// Delivers a frame to one connection.
    pub async fn send_to(&self, id: &ConnectionId, frame: Frame) -> Result<(), SessionError> {
        let channel = {
            let roster = self.roster.lock().await;
            roster.member(id).map(|m| Arc::clone(&m.handle))
        };
        let channel = channel.ok_or(SessionError::ChannelClosed(*id))?;
        channel
            .send(frame)
            .await
            .map_err(|_| SessionError::ChannelClosed(*id))
    }

    /// Delivers a frame to every player, then to the host.
    ///
    /// Failed recipients are collected, never short-circuiting the rest.
    pub async fn broadcast(&self, frame: Frame) -> BroadcastReport {
        let (players, host) = self.roster.lock().await.recipients();

        let mut report = deliver(&players, &frame).await;
        if let Some(host) = host {
            match host.handle.send(frame).await {
                Ok(()) => report.delivered += 1,
                Err(_) => report.failed.push(host.id),
            }
        }

        if !report.is_complete() {
            tracing::warn!(
                session = %self.code,
                delivered = report.delivered,
                failed = report.failed.len(),
                "Broadcast partially failed"
            );
        }
        report
    }

    /// Closes the channels of the given connections.
    ///
    /// Their receive loops then run the usual disconnect path.
    pub async fn evict(&self, ids: &[ConnectionId]) {
        if ids.is_empty() {
            return;
        }
        let channels: Vec<Channel> = {
            let roster = self.roster.lock().await;
            ids.iter()
                .filter_map(|id| roster.member(id).map(|m| Arc::clone(&m.handle)))
                .collect()
        };
        for channel in channels {
            tracing::debug!(session = %self.code, connection = %channel.id(), "Evicting unreachable connection");
            channel.close();
        }
    }

    /// Administrative teardown: everyone receives `frame` and is closed.
    pub async fn close_all(&self, frame: Frame) -> BroadcastReport {
        let teardown = self.roster.lock().await.close();
        let mut members = teardown.players;
        members.extend(teardown.host);
        deliver_and_close(&members, &frame).await
    }

    pub async fn player_count(&self) -> usize {
        self.roster.lock().await.player_count()
    }

    pub async fn is_host_connected(&self) -> bool {
        self.roster.lock().await.is_host_connected()
    }

    pub async fn summary(&self) -> RosterSummary {
        let roster = self.roster.lock().await;
        RosterSummary {
            player_count: roster.player_count(),
            host_connected: roster.is_host_connected(),
        }
    }
}

async fn deliver(members: &[Member<Channel>], frame: &Frame) -> BroadcastReport {
    let sends = members.iter().map(|m| {
        let frame = frame.clone();
        async move { (m.id, m.handle.send(frame).await) }
    });

    let mut report = BroadcastReport::default();
    for (id, result) in join_all(sends).await {
        match result {
            Ok(()) => report.delivered += 1,
            Err(_) => report.failed.push(id),
        }
    }
    report
}

async fn deliver_and_close(members: &[Member<Channel>], frame: &Frame) -> BroadcastReport {
    let report = deliver(members, frame).await;
    for member in members {
        member.handle.close();
    }
    report
}
