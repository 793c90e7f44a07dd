// Public API
pub use controller::ChatController;
pub use mailbox::{ChatEvent, ChatMailbox};
pub use roster::{RosterStore, Session};

pub mod controller;
pub mod mailbox;
pub mod roster;
