//! Remote mail gateway
//!
//! This module provides:
//! - The [`MailGateway`] trait the mailbox controller calls through
//! - The HTTP implementation against the ShooraMail backend
//! - Defensive normalization of backend payloads to domain models
//!
//! Every mutation endpoint is a write-behind mirror: local state is the
//! source of truth for the session, and a failed mirror call never rolls
//! anything back.

mod http;
mod normalize;

pub use http::{DEFAULT_BASE_URL, HttpMailGateway};
pub use normalize::{normalize_mail, normalize_mails};

use anyhow::Result;

use crate::models::{Folder, Message, MessageId};

/// Backend payload types
///
/// The backend's payload shapes are a loose JSON contract, not bit-exact;
/// everything optional here is defaulted during normalization.
pub mod api {
    use serde::{Deserialize, Serialize};

    /// Response from the login endpoint
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct LoginResponse {
        pub user_name: Option<String>,
        pub email: Option<String>,
        pub mails: Option<Vec<RawMail>>,
    }

    /// Response from the inbox/folder fetch endpoints
    #[derive(Debug, Deserialize)]
    pub struct FetchMailsResponse {
        pub mails: Option<Vec<RawMail>>,
    }

    /// One message-like record as the backend sends it
    #[derive(Debug, Clone, Default, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct RawMail {
        pub id: Option<String>,
        pub sender: Option<String>,
        pub from: Option<String>,
        pub subject: Option<String>,
        pub preview: Option<String>,
        pub snippet: Option<String>,
        pub body: Option<String>,
        pub text: Option<String>,
        pub date: Option<String>,
        pub unread: Option<bool>,
        pub flagged: Option<bool>,
        pub important: Option<bool>,
        pub category: Option<String>,
        pub attachments: Option<bool>,
        pub avatar: Option<String>,
        pub folder: Option<String>,
    }

    /// Settings mirror payload
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SettingsPayload {
        pub theme: String,
        pub custom_text: Option<String>,
        pub custom_background: Option<String>,
    }
}

/// Account credentials sent with every gateway call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Result of a successful login
#[derive(Debug)]
pub struct LoginOutcome {
    /// Display name, when the backend provides one
    pub user_name: Option<String>,
    /// Canonical account email
    pub email: String,
    /// Initial inbox snapshot, when the backend provides one
    pub inbox: Option<Vec<Message>>,
}

/// Login failure, surfaced to the user verbatim via `Display`
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid email or password.")]
    InvalidCredentials,
    #[error("No account found for this email.")]
    AccountNotFound,
    #[error("Too many attempts. Please try again later.")]
    RateLimited,
    #[error("Server error. Please try again.")]
    ServerError,
    #[error("Could not reach the mail server.")]
    Unreachable(String),
}

impl LoginError {
    /// Map an HTTP status code to the user-facing failure class
    pub fn from_status(code: u16) -> LoginError {
        match code {
            401 => LoginError::InvalidCredentials,
            404 => LoginError::AccountNotFound,
            429 => LoginError::RateLimited,
            _ => LoginError::ServerError,
        }
    }
}

/// The backend endpoints the mailbox controller consumes.
///
/// Trait-based so tests can swap in a recording mock; the real
/// implementation is [`HttpMailGateway`].
pub trait MailGateway: Send + Sync {
    /// Authenticate and fetch the initial inbox snapshot
    fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, LoginError>;

    /// Fetch the general inbox snapshot
    fn fetch_inbox(&self, creds: &Credentials) -> Result<Vec<Message>>;

    /// Fetch a dedicated folder (sent/drafts/trash/snoozed/scheduled)
    fn fetch_folder(&self, creds: &Credentials, folder: Folder) -> Result<Vec<Message>>;

    /// Send a composed message
    fn send_mail(&self, creds: &Credentials, to: &str, subject: &str, body: &str) -> Result<()>;

    /// Mirror a folder move (trash, restore)
    fn move_mail(&self, creds: &Credentials, id: &MessageId, folder: Folder) -> Result<()>;

    /// Mirror a permanent delete
    fn delete_mail(&self, creds: &Credentials, id: &MessageId) -> Result<()>;

    /// Mirror an unread -> read transition
    fn mark_read(&self, creds: &Credentials, id: &MessageId) -> Result<()>;

    /// Mirror a star toggle
    fn toggle_star(&self, creds: &Credentials, id: &MessageId, flagged: bool) -> Result<()>;

    /// Mirror an important toggle
    fn toggle_important(
        &self,
        creds: &Credentials,
        id: &MessageId,
        important: bool,
    ) -> Result<()>;

    /// Mirror a compose-draft autosave
    fn save_draft(&self, creds: &Credentials, to: &str, subject: &str, body: &str) -> Result<()>;

    /// Mirror a settings change
    fn save_settings(&self, creds: &Credentials, settings: &api::SettingsPayload) -> Result<()>;
}
