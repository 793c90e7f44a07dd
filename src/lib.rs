// Library crate for the chat server
// This file exposes the public API for integration tests

pub mod chat;
pub mod config;
pub mod messages;
pub mod shared;
pub mod websockets;

// Re-export commonly used types for easier access in tests
pub use chat::{ChatController, ChatEvent, ChatMailbox, RosterStore, Session};
pub use messages::{ChatMessage, ClientEvent, ServerEvent, ADMIN};
pub use shared::AppState;
pub use websockets::{
    websocket_handler, Broadcaster, InMemoryBroadcaster, MessageHandler, WebsocketReceiveHandler,
};
