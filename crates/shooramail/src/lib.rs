//! ShooraMail crate - client core for the ShooraMail webmail dashboard
//!
//! This crate provides the UI-free state layer a dashboard shell renders:
//! - Domain models (Message, Folder, Category, Session)
//! - The in-memory message store and its query layer
//! - The mailbox view controller (optimistic mutations, compose autosave,
//!   destructive-action confirmation, toasts)
//! - The write-behind remote gateway (HTTP client + mirror driver)
//! - Theme resolution (selector to color tokens)
//!
//! The governing rule throughout: local state is the source of truth for
//! the current session; the gateway is a best-effort mirror.

pub mod gateway;
pub mod mailbox;
pub mod models;
pub mod query;
pub mod sample;
pub mod store;
pub mod theme;

pub use gateway::{
    Credentials, DEFAULT_BASE_URL, HttpMailGateway, LoginError, LoginOutcome, MailGateway,
    normalize_mail, normalize_mails,
};
pub use mailbox::{
    AUTOSAVE_IDLE, ComposeDraft, ConfirmOutcome, FetchScope, MailboxController, MirrorDriver,
    PendingConfirm, SendError, TOAST_TTL, Toast, ToastKind, sign_in,
};
pub use models::{Category, Folder, Message, MessageBuilder, MessageId, Session};
pub use query::{
    FolderKey, folder_count, folder_predicate, matches_search, unread_inbox_count,
    visible_messages,
};
pub use store::MessageStore;
pub use theme::{ThemeColors, ThemeMode, ThemeOverrides, resolve};
