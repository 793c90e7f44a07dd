use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};

use chatroom::{
    chat::{ChatController, ChatEvent, ChatMailbox},
    messages::ServerEvent,
    websockets::{Broadcaster, InMemoryBroadcaster, MessageHandler, WebsocketReceiveHandler},
};

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A fake connected client: holds the receiving end of the channel the
/// broadcaster delivers into, exactly as a real socket task would.
pub struct TestClient {
    pub conn_id: String,
    receiver: mpsc::UnboundedReceiver<String>,
}

impl TestClient {
    /// Drain and decode everything delivered so far.
    pub fn drain(&mut self) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        while let Ok(raw) = self.receiver.try_recv() {
            events.push(serde_json::from_str(&raw).unwrap());
        }
        events
    }
}

/// The full server core wired together: real broadcaster, real mailbox and
/// controller, and the real frame decoder. Only the sockets are simulated.
pub struct TestSetup {
    pub broadcaster: Arc<dyn Broadcaster>,
    pub mailbox: ChatMailbox,
    pub input_handler: WebsocketReceiveHandler,
}

impl TestSetup {
    pub fn new() -> Self {
        let broadcaster: Arc<dyn Broadcaster> = Arc::new(InMemoryBroadcaster::new());
        let mailbox = ChatMailbox::spawn(ChatController::new(broadcaster.clone()));
        let input_handler = WebsocketReceiveHandler::new(mailbox.clone());
        Self {
            broadcaster,
            mailbox,
            input_handler,
        }
    }

    /// Register a connection and greet it, as the upgrade handler would.
    pub async fn connect(&self, conn_id: &str) -> TestClient {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.broadcaster
            .add_connection(conn_id.to_string(), sender)
            .await;
        self.mailbox.emit(ChatEvent::Connected {
            conn_id: conn_id.to_string(),
        });
        settle().await;
        TestClient {
            conn_id: conn_id.to_string(),
            receiver,
        }
    }

    /// Feed one raw client frame through the receive handler.
    pub async fn send_raw(&self, conn_id: &str, frame: &str) {
        self.input_handler
            .handle_message(conn_id, frame.to_string())
            .await;
        settle().await;
    }

    /// Tear a connection down, as the upgrade handler does on socket close.
    pub async fn disconnect(&self, conn_id: &str) {
        self.broadcaster.remove_connection(conn_id).await;
        self.mailbox.emit(ChatEvent::Disconnected {
            conn_id: conn_id.to_string(),
            reason: "client closed".to_string(),
        });
        settle().await;
    }
}

/// Give the mailbox task a moment to drain.
pub async fn settle() {
    sleep(Duration::from_millis(10)).await;
}
