use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A joined connection's roster entry: who it is and which room it is in.
///
/// `room` is the only field that changes after creation, and only by a
/// whole-entry replacement through [`RosterStore::upsert`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub name: String,
    pub room: String,
}

/// Authoritative mapping of connection id -> session.
///
/// Plain owned state, no internal locking: every mutation goes through the
/// chat mailbox's single consumer task, so reads and writes never interleave.
#[derive(Debug, Default)]
pub struct RosterStore {
    sessions: HashMap<String, Session>,
}

impl RosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace the session for `conn_id`. Replacement overwrites
    /// both the name and the room.
    pub fn upsert(&mut self, conn_id: &str, name: String, room: String) -> Session {
        let session = Session {
            id: conn_id.to_string(),
            name,
            room,
        };
        self.sessions.insert(conn_id.to_string(), session.clone());
        session
    }

    /// Delete the session for `conn_id`, returning it if one existed.
    /// Removing an absent id is a no-op.
    pub fn remove(&mut self, conn_id: &str) -> Option<Session> {
        self.sessions.remove(conn_id)
    }

    pub fn get(&self, conn_id: &str) -> Option<&Session> {
        self.sessions.get(conn_id)
    }

    /// All sessions currently in `room`, in arbitrary order.
    pub fn users_in_room(&self, room: &str) -> Vec<Session> {
        self.sessions
            .values()
            .filter(|session| session.room == room)
            .cloned()
            .collect()
    }

    /// Every room name held by at least one session, duplicates collapsed.
    /// A room ceases to exist the moment its last session leaves.
    pub fn active_rooms(&self) -> Vec<String> {
        let rooms: HashSet<&str> = self
            .sessions
            .values()
            .map(|session| session.room.as_str())
            .collect();
        rooms.into_iter().map(str::to_string).collect()
    }
}
