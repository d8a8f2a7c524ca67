//! Mailbox session orchestration
//!
//! This module provides:
//! - [`MailboxController`] — the view controller one dashboard session runs
//! - [`MirrorDriver`] — the background worker mirroring mutations remotely
//! - [`sign_in`] — the login flow that produces both

mod compose;
mod controller;
mod remote;
mod toast;

pub use compose::{AUTOSAVE_IDLE, AutosaveTimer, ComposeDraft};
pub use controller::{ConfirmOutcome, MailboxController, PendingConfirm, SendError};
pub use remote::{FetchScope, MailboxEvent, MirrorDriver, RemoteCall};
pub use toast::{TOAST_TTL, Toast, ToastKind, ToastQueue};

use std::sync::Arc;

use log::warn;

use crate::gateway::{LoginError, MailGateway};
use crate::models::Session;

/// Authenticate against the gateway and open a dashboard session.
///
/// On success the session identity marker is persisted (best-effort) and a
/// controller/driver pair is returned; the caller spawns or drives the
/// driver. On failure the [`LoginError`] display string is the exact text
/// to show the user.
pub fn sign_in(
    gateway: Arc<dyn MailGateway>,
    email: &str,
    password: &str,
) -> Result<(MailboxController, MirrorDriver), LoginError> {
    let outcome = gateway.login(email, password)?;

    let user_name = outcome
        .user_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| display_name_from_email(&outcome.email));
    let session = Session::new(user_name, outcome.email, password);

    if let Err(e) = session.remember() {
        warn!("Failed to persist session marker: {e:#}");
    }

    Ok(MailboxController::connect(session, outcome.inbox, gateway))
}

/// Fallback display name when the backend sends none
fn display_name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    if local.is_empty() {
        email.to_string()
    } else {
        local.to_string()
    }
}
