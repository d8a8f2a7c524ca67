//! Domain models for mail entities

mod folder;
mod message;
mod session;

pub use folder::{Category, Folder};
pub use message::{Message, MessageBuilder, MessageId};
pub use session::Session;
