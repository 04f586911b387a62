//! Roster of one session: the host slot and the player set.
//!
//! Pure state with no I/O. The owning registry guards it with a lock and
//! performs all sends after releasing that lock.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::{PlayerNumber, RequestedRole, Role};
use crate::domain::foundation::ConnectionId;

/// Why the roster refused an admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("a host is already connected")]
    HostAlreadyConnected,

    #[error("the roster has been torn down")]
    Closed,
}

/// One admitted connection.
#[derive(Debug, Clone)]
pub struct Member<H> {
    pub id: ConnectionId,
    pub role: Role,
    pub handle: H,
}

/// Everything removed by a teardown.
#[derive(Debug)]
pub struct Teardown<H> {
    pub host: Option<Member<H>>,
    /// Players in join order.
    pub players: Vec<Member<H>>,
}

/// Host slot plus players, indexed by connection id.
///
/// Player numbers come from a counter that only moves forward, so a number
/// is never handed out twice within one session.
///
/// A newly admitted player stays pending, and out of `recipients`, until
/// `activate` is called once its role assignment has been written.
#[derive(Debug)]
pub struct Roster<H> {
    host: Option<Member<H>>,
    players: HashMap<ConnectionId, Member<H>>,
    pending: HashSet<ConnectionId>,
    next_player: PlayerNumber,
    closed: bool,
}

impl<H> Roster<H> {
    pub fn new() -> Self {
        Self {
            host: None,
            players: HashMap::new(),
            pending: HashSet::new(),
            next_player: PlayerNumber::FIRST,
            closed: false,
        }
    }

    /// Admits a connection under the requested role.
    pub fn admit(
        &mut self,
        id: ConnectionId,
        requested: RequestedRole,
        handle: H,
    ) -> Result<Role, RosterError> {
        if self.closed {
            return Err(RosterError::Closed);
        }
        match requested {
            RequestedRole::Host => {
                if self.host.is_some() {
                    return Err(RosterError::HostAlreadyConnected);
                }
                self.host = Some(Member {
                    id,
                    role: Role::Host,
                    handle,
                });
                Ok(Role::Host)
            }
            RequestedRole::Player => {
                let number = self.next_player;
                self.next_player = number.next();
                let role = Role::Player(number);
                self.players.insert(id, Member { id, role, handle });
                self.pending.insert(id);
                Ok(role)
            }
        }
    }

    /// Makes a pending player a broadcast recipient.
    ///
    /// Returns false if the player was removed or torn down in the meantime.
    pub fn activate(&mut self, id: &ConnectionId) -> bool {
        self.pending.remove(id) && self.players.contains_key(id)
    }

    pub fn is_pending(&self, id: &ConnectionId) -> bool {
        self.pending.contains(id)
    }

    /// Removes a player by connection id.
    pub fn remove_player(&mut self, id: &ConnectionId) -> Option<PlayerNumber> {
        self.pending.remove(id);
        self.players
            .remove(id)
            .and_then(|member| member.role.player_number())
    }

    /// Removes everyone and refuses all later admissions.
    pub fn close(&mut self) -> Teardown<H> {
        self.closed = true;
        self.pending.clear();
        let mut players: Vec<Member<H>> = self.players.drain().map(|(_, m)| m).collect();
        players.sort_by_key(|m| m.role.player_number());
        Teardown {
            host: self.host.take(),
            players,
        }
    }

    pub fn member(&self, id: &ConnectionId) -> Option<&Member<H>> {
        match &self.host {
            Some(host) if host.id == *id => Some(host),
            _ => self.players.get(id),
        }
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_host_connected(&self) -> bool {
        self.host.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<H: Clone> Roster<H> {
    /// Copy of the current recipients: active players in join order, then
    /// the host.
    pub fn recipients(&self) -> (Vec<Member<H>>, Option<Member<H>>) {
        let mut players: Vec<Member<H>> = self
            .players
            .values()
            .filter(|m| !self.pending.contains(&m.id))
            .cloned()
            .collect();
        players.sort_by_key(|m| m.role.player_number());
        (players, self.host.clone())
    }
}

impl<H> Default for Roster<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn number(n: u32) -> PlayerNumber {
        PlayerNumber::new(n).unwrap()
    }

    #[test]
    fn first_host_is_admitted() {
        let mut roster = Roster::new();
        let role = roster.admit(ConnectionId::new(), RequestedRole::Host, ()).unwrap();
        assert_eq!(role, Role::Host);
        assert!(roster.is_host_connected());
    }

    #[test]
    fn second_host_is_refused_and_first_kept() {
        let mut roster = Roster::new();
        let first = ConnectionId::new();
        roster.admit(first, RequestedRole::Host, "first").unwrap();

        let result = roster.admit(ConnectionId::new(), RequestedRole::Host, "second");

        assert_eq!(result, Err(RosterError::HostAlreadyConnected));
        assert_eq!(roster.member(&first).map(|m| m.handle), Some("first"));
    }

    #[test]
    fn players_are_numbered_from_one() {
        let mut roster = Roster::new();
        let a = roster.admit(ConnectionId::new(), RequestedRole::Player, ()).unwrap();
        let b = roster.admit(ConnectionId::new(), RequestedRole::Player, ()).unwrap();
        assert_eq!(a, Role::Player(number(1)));
        assert_eq!(b, Role::Player(number(2)));
        assert_eq!(roster.player_count(), 2);
    }

    #[test]
    fn player_numbers_are_not_reused_after_leaving() {
        let mut roster = Roster::new();
        let first = ConnectionId::new();
        roster.admit(first, RequestedRole::Player, ()).unwrap();
        roster.admit(ConnectionId::new(), RequestedRole::Player, ()).unwrap();

        assert_eq!(roster.remove_player(&first), Some(number(1)));
        let next = roster.admit(ConnectionId::new(), RequestedRole::Player, ()).unwrap();

        assert_eq!(next, Role::Player(number(3)));
    }

    #[test]
    fn remove_unknown_player_is_noop() {
        let mut roster: Roster<()> = Roster::new();
        assert_eq!(roster.remove_player(&ConnectionId::new()), None);
    }

    #[test]
    fn remove_player_ignores_host() {
        let mut roster = Roster::new();
        let host = ConnectionId::new();
        roster.admit(host, RequestedRole::Host, ()).unwrap();
        assert_eq!(roster.remove_player(&host), None);
        assert!(roster.is_host_connected());
    }

    #[test]
    fn close_drains_everyone_in_join_order() {
        let mut roster = Roster::new();
        roster.admit(ConnectionId::new(), RequestedRole::Host, "h").unwrap();
        for name in ["p1", "p2", "p3"] {
            roster.admit(ConnectionId::new(), RequestedRole::Player, name).unwrap();
        }

        let teardown = roster.close();

        assert_eq!(teardown.host.map(|m| m.handle), Some("h"));
        let names: Vec<_> = teardown.players.iter().map(|m| m.handle).collect();
        assert_eq!(names, vec!["p1", "p2", "p3"]);
        assert_eq!(roster.player_count(), 0);
        assert!(!roster.is_host_connected());
    }

    #[test]
    fn closed_roster_refuses_everyone() {
        let mut roster = Roster::new();
        roster.close();
        assert_eq!(
            roster.admit(ConnectionId::new(), RequestedRole::Player, ()),
            Err(RosterError::Closed)
        );
        assert_eq!(
            roster.admit(ConnectionId::new(), RequestedRole::Host, ()),
            Err(RosterError::Closed)
        );
        assert!(roster.is_closed());
    }

    #[test]
    fn recipients_put_host_last() {
        let mut roster = Roster::new();
        let p1 = ConnectionId::new();
        let p2 = ConnectionId::new();
        roster.admit(p1, RequestedRole::Player, "p1").unwrap();
        roster.admit(ConnectionId::new(), RequestedRole::Host, "h").unwrap();
        roster.admit(p2, RequestedRole::Player, "p2").unwrap();
        roster.activate(&p1);
        roster.activate(&p2);

        let (players, host) = roster.recipients();

        let names: Vec<_> = players.iter().map(|m| m.handle).collect();
        assert_eq!(names, vec!["p1", "p2"]);
        assert_eq!(host.map(|m| m.handle), Some("h"));
    }

    #[test]
    fn pending_player_is_not_a_recipient_until_activated() {
        let mut roster = Roster::new();
        let id = ConnectionId::new();
        roster.admit(id, RequestedRole::Player, "p1").unwrap();

        assert!(roster.is_pending(&id));
        assert!(roster.recipients().0.is_empty());
        assert_eq!(roster.player_count(), 1);

        assert!(roster.activate(&id));
        assert!(!roster.is_pending(&id));
        assert_eq!(roster.recipients().0.len(), 1);
    }

    #[test]
    fn activate_fails_after_removal_or_teardown() {
        let mut roster = Roster::new();
        let removed = ConnectionId::new();
        let torn_down = ConnectionId::new();
        roster.admit(removed, RequestedRole::Player, ()).unwrap();
        roster.admit(torn_down, RequestedRole::Player, ()).unwrap();

        roster.remove_player(&removed);
        assert!(!roster.activate(&removed));

        roster.close();
        assert!(!roster.activate(&torn_down));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Host,
        Player,
        LeavePlayer(usize),
        LeaveHost,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Host),
            Just(Op::Player),
            any::<usize>().prop_map(Op::LeavePlayer),
            Just(Op::LeaveHost),
        ]
    }

    proptest! {
        #[test]
        fn at_most_one_host_and_numbers_strictly_increase(ops in proptest::collection::vec(op(), 0..64)) {
            let mut roster: Roster<()> = Roster::new();
            let mut host: Option<ConnectionId> = None;
            let mut players: Vec<ConnectionId> = Vec::new();
            let mut last_number = 0u32;

            for op in ops {
                match op {
                    Op::Host => {
                        let result = roster.admit(ConnectionId::new(), RequestedRole::Host, ());
                        if host.is_some() {
                            prop_assert_eq!(result, Err(RosterError::HostAlreadyConnected));
                        } else {
                            prop_assert_eq!(result, Ok(Role::Host));
                            host = Some(ConnectionId::new());
                        }
                    }
                    Op::Player => {
                        let id = ConnectionId::new();
                        let role = roster.admit(id, RequestedRole::Player, ()).unwrap();
                        let n = role.player_number().unwrap().get();
                        prop_assert!(n > last_number);
                        last_number = n;
                        players.push(id);
                    }
                    Op::LeavePlayer(i) => {
                        if !players.is_empty() {
                            let id = players.remove(i % players.len());
                            prop_assert!(roster.remove_player(&id).is_some());
                        }
                    }
                    Op::LeaveHost => {
                        // Host departure tears the roster down; start a fresh one
                        // to keep exercising admissions.
                        if host.take().is_some() {
                            let teardown = roster.close();
                            prop_assert!(teardown.host.is_some());
                            prop_assert_eq!(teardown.players.len(), players.len());
                            players.clear();
                            roster = Roster::new();
                            last_number = 0;
                        }
                    }
                }
                prop_assert_eq!(roster.is_host_connected(), host.is_some());
                prop_assert_eq!(roster.player_count(), players.len());
            }
        }
    }
}
