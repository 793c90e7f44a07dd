use chatroom::messages::ClientEvent;

use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    async fn send_event(&self, conn_id: &str, event: ClientEvent) {
        let frame = serde_json::to_string(&event).unwrap();
        self.send_raw(conn_id, &frame).await;
    }

    /// Join (or switch to) a room
    pub async fn join_room(&self, conn_id: &str, name: &str, room: &str) {
        self.send_event(
            conn_id,
            ClientEvent::JoinRoom {
                name: name.to_string(),
                room: room.to_string(),
            },
        )
        .await;
    }

    /// Send a chat message
    pub async fn send_chat(&self, conn_id: &str, name: &str, text: &str) {
        self.send_event(
            conn_id,
            ClientEvent::Message {
                name: name.to_string(),
                text: text.to_string(),
            },
        )
        .await;
    }

    /// Send a typing indicator
    pub async fn send_typing(&self, conn_id: &str, name: &str) {
        self.send_event(conn_id, ClientEvent::Typing(name.to_string()))
            .await;
    }
}
