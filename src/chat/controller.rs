use std::sync::Arc;
use tracing::{debug, info};

use crate::messages::ServerEvent;
use crate::websockets::Broadcaster;

use super::mailbox::ChatEvent;
use super::roster::RosterStore;

/// Routes each inbound chat event to the right audience and keeps the roster
/// consistent while connections join, switch rooms, and disconnect.
///
/// The controller exclusively owns the roster. It must only be driven from
/// the mailbox task so that no two handlers run against the roster at once.
pub struct ChatController {
    roster: RosterStore,
    broadcaster: Arc<dyn Broadcaster>,
}

impl ChatController {
    pub fn new(broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self {
            roster: RosterStore::new(),
            broadcaster,
        }
    }

    pub async fn dispatch(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::Connected { conn_id } => self.handle_connect(&conn_id).await,
            ChatEvent::JoinRoom {
                conn_id,
                name,
                room,
            } => self.handle_join_room(&conn_id, name, room).await,
            ChatEvent::Message {
                conn_id,
                name,
                text,
            } => self.handle_message(&conn_id, name, text).await,
            ChatEvent::Typing { conn_id, name } => self.handle_typing(&conn_id, name).await,
            ChatEvent::Disconnected { conn_id, reason } => {
                self.handle_disconnect(&conn_id, &reason).await
            }
        }
    }

    /// A new connection gets a greeting and nothing else; it stays unjoined
    /// until it sends an explicit joinRoom.
    pub async fn handle_connect(&mut self, conn_id: &str) {
        info!(conn_id = %conn_id, "Connection established");

        self.broadcaster
            .send_to(conn_id, &ServerEvent::system("Welcome to Chat App!").to_json())
            .await;
    }

    /// First join creates the session; later joins move it to a new room,
    /// announcing the departure to the old room first.
    pub async fn handle_join_room(&mut self, conn_id: &str, name: String, room: String) {
        let previous = self.roster.get(conn_id).cloned();

        if let Some(prev) = &previous {
            // Announce under the pre-update name.
            self.broadcaster.leave_group(conn_id, &prev.room).await;
            self.broadcaster
                .send_to_group(
                    &prev.room,
                    &ServerEvent::system(format!(
                        "{} has left the room {}!",
                        prev.name, prev.room
                    ))
                    .to_json(),
                )
                .await;
        }

        let session = self.roster.upsert(conn_id, name, room);

        // The old room's roster can only be re-derived after the upsert above
        // has moved this connection out of it.
        if let Some(prev) = &previous {
            self.broadcaster
                .send_to_group(
                    &prev.room,
                    &ServerEvent::user_list(self.roster.users_in_room(&prev.room)).to_json(),
                )
                .await;
        }

        self.broadcaster.join_group(conn_id, &session.room).await;

        self.broadcaster
            .send_to(
                conn_id,
                &ServerEvent::system(format!("Welcome to the room {}!", session.room)).to_json(),
            )
            .await;

        self.broadcaster
            .send_to_all_except(
                conn_id,
                &ServerEvent::system(format!(
                    "{} has joined the room {}!",
                    session.name, session.room
                ))
                .to_json(),
            )
            .await;

        self.broadcaster
            .send_to_group(
                &session.room,
                &ServerEvent::user_list(self.roster.users_in_room(&session.room)).to_json(),
            )
            .await;

        self.broadcaster
            .send_to_all(&ServerEvent::room_list(self.roster.active_rooms()).to_json())
            .await;

        info!(conn_id = %conn_id, name = %session.name, room = %session.room, "Joined room");
    }

    /// Relay a chat line to the sender's room. Connections that never joined
    /// have no room, so their messages are dropped.
    pub async fn handle_message(&mut self, conn_id: &str, name: String, text: String) {
        let room = match self.roster.get(conn_id) {
            Some(session) => session.room.clone(),
            None => {
                debug!(conn_id = %conn_id, "Message from a connection with no session, dropping");
                return;
            }
        };

        self.broadcaster
            .send_to_group(&room, &ServerEvent::chat(name, text).to_json())
            .await;
    }

    /// Relay a typing indicator to everyone else in the sender's room.
    pub async fn handle_typing(&mut self, conn_id: &str, name: String) {
        let room = match self.roster.get(conn_id) {
            Some(session) => session.room.clone(),
            None => {
                debug!(conn_id = %conn_id, "Typing from a connection with no session, dropping");
                return;
            }
        };

        self.broadcaster
            .send_to_group_except(&room, conn_id, &ServerEvent::typing(name).to_json())
            .await;
    }

    /// Drop the session and tell everyone. The departure message goes to all
    /// connections, not just the old room, matching the join announcement's
    /// app-wide scope.
    pub async fn handle_disconnect(&mut self, conn_id: &str, reason: &str) {
        info!(conn_id = %conn_id, reason = %reason, "Connection closed");

        let session = match self.roster.remove(conn_id) {
            Some(session) => session,
            None => return,
        };

        self.broadcaster
            .send_to_all(
                &ServerEvent::system(format!("{} has left the Chat App!", session.name)).to_json(),
            )
            .await;

        self.broadcaster
            .send_to_group(
                &session.room,
                &ServerEvent::user_list(self.roster.users_in_room(&session.room)).to_json(),
            )
            .await;

        self.broadcaster
            .send_to_all(&ServerEvent::room_list(self.roster.active_rooms()).to_json())
            .await;
    }
}
