use async_trait::async_trait;
use axum::{
    extract::{State, WebSocketUpgrade},
    response::Response,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::chat::{ChatEvent, ChatMailbox};
use crate::messages::ClientEvent;
use crate::shared::AppState;

use super::socket::{Connection, MessageHandler};

/// Decodes inbound client frames and feeds them to the chat mailbox.
///
/// Malformed frames and unknown events never fail the connection; they are
/// logged and dropped, and the protocol simply sends nothing in response.
pub struct WebsocketReceiveHandler {
    mailbox: ChatMailbox,
}

impl WebsocketReceiveHandler {
    pub fn new(mailbox: ChatMailbox) -> Self {
        Self { mailbox }
    }
}

#[async_trait]
impl MessageHandler for WebsocketReceiveHandler {
    async fn handle_message(&self, conn_id: &str, message: String) {
        match serde_json::from_str::<ClientEvent>(&message) {
            Ok(ClientEvent::JoinRoom { name, room }) => {
                if name.is_empty() || room.is_empty() {
                    warn!(conn_id = %conn_id, "joinRoom with empty name or room, dropping");
                    return;
                }
                self.mailbox.emit(ChatEvent::JoinRoom {
                    conn_id: conn_id.to_string(),
                    name,
                    room,
                });
            }
            Ok(ClientEvent::Message { name, text }) => {
                self.mailbox.emit(ChatEvent::Message {
                    conn_id: conn_id.to_string(),
                    name,
                    text,
                });
            }
            Ok(ClientEvent::Typing(name)) => {
                self.mailbox.emit(ChatEvent::Typing {
                    conn_id: conn_id.to_string(),
                    name,
                });
            }
            Err(e) => {
                warn!(
                    conn_id = %conn_id,
                    error = %e,
                    "Failed to parse client frame, dropping"
                );
            }
        }
    }
}

/// WebSocket endpoint. No authentication: any client may connect and join
/// any room by name.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_websocket_connection(socket, app_state))
}

/// Handle the upgraded WebSocket connection
async fn handle_websocket_connection(socket: axum::extract::ws::WebSocket, app_state: AppState) {
    // Connection ids are assigned here, are stable for the socket's lifetime,
    // and are never reused while the socket is open.
    let conn_id = Uuid::new_v4().to_string();

    info!(conn_id = %conn_id, "WebSocket connection established");

    // Outbound channel (app -> client), registered before the greeting so the
    // connect event's welcome has somewhere to go.
    let (outbound_sender, outbound_receiver) = mpsc::unbounded_channel::<String>();
    app_state
        .broadcaster
        .add_connection(conn_id.clone(), outbound_sender)
        .await;

    app_state.mailbox.emit(ChatEvent::Connected {
        conn_id: conn_id.clone(),
    });

    let message_handler = Arc::new(WebsocketReceiveHandler::new(app_state.mailbox.clone()));
    let connection = Connection::new(
        conn_id.clone(),
        Box::new(socket),
        outbound_receiver,
        message_handler,
    );

    // Run the connection until disconnect
    let reason = connection.run().await;

    info!(conn_id = %conn_id, reason = %reason, "WebSocket connection closed");

    // Cleanup: drop the transport registration first so the disconnect
    // broadcasts cannot target the closed socket.
    app_state.broadcaster.remove_connection(&conn_id).await;
    app_state.mailbox.emit(ChatEvent::Disconnected { conn_id, reason });
}
