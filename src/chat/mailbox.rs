use tokio::sync::mpsc;
use tracing::debug;

use super::controller::ChatController;

/// One inbound protocol event, as delivered by the transport layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    Connected {
        conn_id: String,
    },
    JoinRoom {
        conn_id: String,
        name: String,
        room: String,
    },
    Message {
        conn_id: String,
        name: String,
        text: String,
    },
    Typing {
        conn_id: String,
        name: String,
    },
    Disconnected {
        conn_id: String,
        reason: String,
    },
}

/// Cloneable handle to the single chat event-processing task.
///
/// Events from all connections funnel through one channel; the spawned task
/// owns the controller and drains them one at a time, in arrival order. That
/// is what makes the controller's multi-step read-modify-broadcast sequences
/// safe without any locking around the roster.
#[derive(Clone)]
pub struct ChatMailbox {
    sender: mpsc::UnboundedSender<ChatEvent>,
}

impl ChatMailbox {
    /// Spawn the consumer task and return the producers' handle. The task
    /// stops once every handle is dropped.
    pub fn spawn(mut controller: ChatController) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(event) = receiver.recv().await {
                debug!(event = ?event, "Processing chat event");
                controller.dispatch(event).await;
            }
            debug!("Chat mailbox closed, stopping");
        });

        Self { sender }
    }

    /// Fire-and-forget enqueue. A send after the consumer has stopped is
    /// silently discarded, matching the protocol's best-effort semantics.
    pub fn emit(&self, event: ChatEvent) {
        let _ = self.sender.send(event);
    }
}
