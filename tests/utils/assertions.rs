//! Helpers for picking apart the event streams drained from test clients.
#![allow(dead_code)] // Test utilities may not all be used in every test

use chatroom::messages::{ServerEvent, ADMIN};

/// All chat lines, as (author, text) pairs.
pub fn chat_lines(events: &[ServerEvent]) -> Vec<(String, String)> {
    events
        .iter()
        .filter_map(|event| match event {
            ServerEvent::Message(message) => Some((message.name.clone(), message.text.clone())),
            _ => None,
        })
        .collect()
}

/// Texts of server-authored messages only.
pub fn system_texts(events: &[ServerEvent]) -> Vec<String> {
    chat_lines(events)
        .into_iter()
        .filter(|(name, _)| name == ADMIN)
        .map(|(_, text)| text)
        .collect()
}

/// Display names in the most recent userList broadcast, sorted.
pub fn last_user_names(events: &[ServerEvent]) -> Vec<String> {
    let mut names: Vec<String> = events
        .iter()
        .rev()
        .find_map(|event| match event {
            ServerEvent::UserList { users } => {
                Some(users.iter().map(|u| u.name.clone()).collect())
            }
            _ => None,
        })
        .unwrap_or_default();
    names.sort();
    names
}

/// Rooms in the most recent roomList broadcast, sorted.
pub fn last_room_list(events: &[ServerEvent]) -> Vec<String> {
    let mut rooms: Vec<String> = events
        .iter()
        .rev()
        .find_map(|event| match event {
            ServerEvent::RoomList { rooms } => Some(rooms.clone()),
            _ => None,
        })
        .unwrap_or_default();
    rooms.sort();
    rooms
}

/// Names carried by typing indicators.
pub fn typing_names(events: &[ServerEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            ServerEvent::Typing(name) => Some(name.clone()),
            _ => None,
        })
        .collect()
}
