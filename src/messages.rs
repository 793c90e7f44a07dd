use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::chat::roster::Session;

/// Reserved author name for server-generated chat messages. Clients
/// special-case it for rendering; it carries no other protocol meaning.
pub const ADMIN: &str = "admin";

/// Client-to-server events, as received on the wire.
///
/// The envelope is `{"event": <name>, "payload": <payload>}`; event and field
/// names are part of the wire contract and must not change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Join a named room, creating or re-targeting this connection's session.
    JoinRoom { name: String, room: String },
    /// A chat line for the sender's current room.
    Message { name: String, text: String },
    /// Typing activity; the payload is the bare display name.
    Typing(String),
}

/// Server-to-client events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum ServerEvent {
    Message(ChatMessage),
    UserList { users: Vec<Session> },
    RoomList { rooms: Vec<String> },
    Typing(String),
}

/// A chat line as broadcast to a room. `time` is display text only, stamped
/// at send time in the server's local zone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub name: String,
    pub text: String,
    pub time: String,
}

impl ServerEvent {
    /// Create a chat message stamped with the current wall-clock time.
    pub fn chat(name: String, text: String) -> Self {
        Self::Message(ChatMessage {
            name,
            text,
            time: format_clock_time(&Local::now()),
        })
    }

    /// Create a server-authored chat message under the [`ADMIN`] name.
    pub fn system(text: impl Into<String>) -> Self {
        Self::chat(ADMIN.to_string(), text.into())
    }

    pub fn user_list(users: Vec<Session>) -> Self {
        Self::UserList { users }
    }

    pub fn room_list(rooms: Vec<String>) -> Self {
        Self::RoomList { rooms }
    }

    pub fn typing(name: String) -> Self {
        Self::Typing(name)
    }

    /// Encode for the wire. Serializing these enums cannot fail.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

/// 12-hour `h:mm:ss am/pm` clock time, e.g. `4:45:12 pm`.
pub fn format_clock_time(at: &DateTime<Local>) -> String {
    at.format("%-I:%M:%S %P").to_string()
}
