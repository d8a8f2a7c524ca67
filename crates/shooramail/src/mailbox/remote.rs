//! Write-behind mirror plumbing
//!
//! The controller never blocks on the network: it enqueues [`RemoteCall`]s
//! on a channel, and a [`MirrorDriver`] owning the gateway executes them and
//! reports completions back as [`MailboxEvent`]s. The controller drains
//! events from its own thread in `pump`, so the store keeps a single
//! mutator.
//!
//! The call channel is FIFO, so one driver completes fetches in request
//! order. The controller applies fetch results in arrival order regardless
//! (last-completed-write-wins); hosts that run several drivers get exactly
//! the upstream race and the same resolution.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::JoinHandle;

use crate::gateway::{Credentials, MailGateway, api::SettingsPayload};
use crate::models::{Folder, Message, MessageId};
use crate::query::FolderKey;

/// Which fetch endpoint a refetch uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchScope {
    /// The general inbox fetch; virtual views filter client-side
    Inbox,
    /// A dedicated folder fetch
    Folder(Folder),
}

impl FetchScope {
    /// Map a sidebar selector to its fetch scope. Only the real secondary
    /// folders have dedicated endpoints; everything else reuses the inbox
    /// fetch.
    pub fn for_key(key: FolderKey) -> FetchScope {
        match key {
            FolderKey::Sent => FetchScope::Folder(Folder::Sent),
            FolderKey::Drafts => FetchScope::Folder(Folder::Drafts),
            FolderKey::Trash => FetchScope::Folder(Folder::Trash),
            FolderKey::Snoozed => FetchScope::Folder(Folder::Snoozed),
            FolderKey::Scheduled => FetchScope::Folder(Folder::Scheduled),
            _ => FetchScope::Inbox,
        }
    }
}

/// A remote call queued by the controller
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall {
    Fetch(FetchScope),
    MarkRead(MessageId),
    SetFlagged(MessageId, bool),
    SetImportant(MessageId, bool),
    Move(MessageId, Folder),
    Delete(MessageId),
    Send {
        to: String,
        subject: String,
        body: String,
    },
    SaveDraft {
        to: String,
        subject: String,
        body: String,
    },
    SaveSettings(SettingsPayload),
}

/// A completion delivered back to the controller
#[derive(Debug)]
pub enum MailboxEvent {
    FetchFinished {
        scope: FetchScope,
        result: Result<Vec<Message>, String>,
    },
    SendFinished {
        result: Result<(), String>,
    },
    /// A fire-and-forget mirror call failed; logged, never surfaced
    MirrorFailed {
        call: &'static str,
        error: String,
    },
}

/// Background worker executing remote calls against the gateway
pub struct MirrorDriver {
    gateway: Arc<dyn MailGateway>,
    creds: Credentials,
    calls: Receiver<RemoteCall>,
    events: Sender<MailboxEvent>,
}

impl MirrorDriver {
    pub(crate) fn new(
        gateway: Arc<dyn MailGateway>,
        creds: Credentials,
    ) -> (Sender<RemoteCall>, Receiver<MailboxEvent>, MirrorDriver) {
        let (call_tx, call_rx) = channel();
        let (event_tx, event_rx) = channel();
        let driver = MirrorDriver {
            gateway,
            creds,
            calls: call_rx,
            events: event_tx,
        };
        (call_tx, event_rx, driver)
    }

    /// Run until the controller drops its call sender.
    ///
    /// In-flight work is never cancelled: when the controller goes away,
    /// remaining completions land on a disconnected channel and are
    /// discarded harmlessly.
    pub fn run(self) {
        while let Ok(call) = self.calls.recv() {
            self.execute(call);
        }
    }

    /// Execute only the calls already queued, then return.
    ///
    /// Deterministic drain for tests and for hosts that drive the mirror
    /// from their own scheduler.
    pub fn run_pending(&self) {
        while let Ok(call) = self.calls.try_recv() {
            self.execute(call);
        }
    }

    /// Consume the driver into a background thread
    pub fn spawn(self) -> JoinHandle<()> {
        std::thread::spawn(move || self.run())
    }

    fn execute(&self, call: RemoteCall) {
        let event = match call {
            RemoteCall::Fetch(scope) => {
                let result = match scope {
                    FetchScope::Inbox => self.gateway.fetch_inbox(&self.creds),
                    FetchScope::Folder(folder) => self.gateway.fetch_folder(&self.creds, folder),
                };
                Some(MailboxEvent::FetchFinished {
                    scope,
                    result: result.map_err(|e| format!("{e:#}")),
                })
            }
            RemoteCall::Send { to, subject, body } => {
                let result = self.gateway.send_mail(&self.creds, &to, &subject, &body);
                Some(MailboxEvent::SendFinished {
                    result: result.map_err(|e| format!("{e:#}")),
                })
            }
            RemoteCall::MarkRead(id) => self
                .mirror("mark-read", self.gateway.mark_read(&self.creds, &id)),
            RemoteCall::SetFlagged(id, flagged) => self.mirror(
                "toggle-star",
                self.gateway.toggle_star(&self.creds, &id, flagged),
            ),
            RemoteCall::SetImportant(id, important) => self.mirror(
                "toggle-important",
                self.gateway.toggle_important(&self.creds, &id, important),
            ),
            RemoteCall::Move(id, folder) => self.mirror(
                "move-mail",
                self.gateway.move_mail(&self.creds, &id, folder),
            ),
            RemoteCall::Delete(id) => self
                .mirror("delete-mail", self.gateway.delete_mail(&self.creds, &id)),
            RemoteCall::SaveDraft { to, subject, body } => self.mirror(
                "save-draft",
                self.gateway.save_draft(&self.creds, &to, &subject, &body),
            ),
            RemoteCall::SaveSettings(settings) => self.mirror(
                "settings",
                self.gateway.save_settings(&self.creds, &settings),
            ),
        };

        if let Some(event) = event {
            // The controller may already be gone; its loss is the
            // cancellation story.
            let _ = self.events.send(event);
        }
    }

    /// Fire-and-forget mirror call: success produces no event at all
    fn mirror(&self, call: &'static str, result: anyhow::Result<()>) -> Option<MailboxEvent> {
        match result {
            Ok(()) => None,
            Err(e) => Some(MailboxEvent::MirrorFailed {
                call,
                error: format!("{e:#}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_scope_for_key() {
        assert_eq!(FetchScope::for_key(FolderKey::Inbox), FetchScope::Inbox);
        assert_eq!(FetchScope::for_key(FolderKey::Starred), FetchScope::Inbox);
        assert_eq!(FetchScope::for_key(FolderKey::Important), FetchScope::Inbox);
        assert_eq!(FetchScope::for_key(FolderKey::All), FetchScope::Inbox);
        assert_eq!(
            FetchScope::for_key(FolderKey::Category(crate::models::Category::Work)),
            FetchScope::Inbox
        );

        assert_eq!(
            FetchScope::for_key(FolderKey::Sent),
            FetchScope::Folder(Folder::Sent)
        );
        assert_eq!(
            FetchScope::for_key(FolderKey::Drafts),
            FetchScope::Folder(Folder::Drafts)
        );
        assert_eq!(
            FetchScope::for_key(FolderKey::Trash),
            FetchScope::Folder(Folder::Trash)
        );
        assert_eq!(
            FetchScope::for_key(FolderKey::Snoozed),
            FetchScope::Folder(Folder::Snoozed)
        );
        assert_eq!(
            FetchScope::for_key(FolderKey::Scheduled),
            FetchScope::Folder(Folder::Scheduled)
        );
    }
}
