use std::sync::Arc;

use crate::chat::ChatMailbox;
use crate::websockets::Broadcaster;

/// Shared application state handed to every axum handler.
///
/// The broadcaster is the transport-side fan-out; the mailbox is the single
/// entry point into the serialized chat event loop.
#[derive(Clone)]
pub struct AppState {
    pub broadcaster: Arc<dyn Broadcaster>,
    pub mailbox: ChatMailbox,
}

impl AppState {
    pub fn new(broadcaster: Arc<dyn Broadcaster>, mailbox: ChatMailbox) -> Self {
        Self {
            broadcaster,
            mailbox,
        }
    }
}
