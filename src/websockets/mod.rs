// Public API
pub use broadcaster::{Broadcaster, InMemoryBroadcaster};
pub use handler::{websocket_handler, WebsocketReceiveHandler};
pub use socket::{Connection, MessageHandler, SocketError};

// Internal modules
mod broadcaster;
mod handler;
mod socket;
