//! Mailbox view controller
//!
//! Translates user intent into optimistic store mutations plus mirrored
//! remote calls, and exposes the derived view the presentation layer
//! renders. The governing rule: local state is the source of truth for the
//! current session; the gateway is a write-behind mirror whose failures
//! never roll anything back.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Instant;

use log::{debug, warn};

use super::compose::{AutosaveTimer, ComposeDraft};
use super::remote::{FetchScope, MailboxEvent, MirrorDriver, RemoteCall};
use super::toast::{Toast, ToastKind, ToastQueue};
use crate::gateway::{MailGateway, api::SettingsPayload};
use crate::models::{Folder, Message, MessageId, Session};
use crate::query::{self, FolderKey};
use crate::sample;
use crate::store::MessageStore;
use crate::theme::{self, ThemeColors, ThemeMode, ThemeOverrides};

/// Display date for locally sent messages
const SENT_JUST_NOW: &str = "Just now";

/// A destructive action awaiting explicit user confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingConfirm {
    /// Deleting a message that is already in trash is irreversible
    PermanentDelete(MessageId),
    Logout,
}

/// What a confirmed destructive action did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Deleted(MessageId),
    /// The session is torn down; the host should drop the controller
    LoggedOut,
}

/// Local rejection of a send attempt; no remote call was made
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SendError {
    #[error("To, subject and message are all required.")]
    Incomplete,
    #[error("the compose surface is not open")]
    ComposeClosed,
}

/// Orchestrates one signed-in dashboard session.
///
/// Single-threaded by design: every store mutation happens on the owning
/// thread, either directly from a user-intent method or from [`pump`]
/// draining mirror completions. The paired [`MirrorDriver`] is the only
/// thing that touches the network.
///
/// [`pump`]: MailboxController::pump
pub struct MailboxController {
    session: Session,
    store: MessageStore,
    active_folder: FolderKey,
    search_query: String,
    selected: Option<MessageId>,
    compose: Option<ComposeDraft>,
    autosave: AutosaveTimer,
    pending_confirm: Option<PendingConfirm>,
    toasts: ToastQueue,
    theme_mode: ThemeMode,
    theme_overrides: ThemeOverrides,
    in_flight_fetches: usize,
    sending: bool,
    next_local_id: u64,
    calls: Sender<RemoteCall>,
    events: Receiver<MailboxEvent>,
}

impl MailboxController {
    /// Build a controller and its mirror driver from a fresh session.
    ///
    /// When the login response carried no snapshot, the starter inbox is
    /// used so the dashboard never opens empty. The caller decides how to
    /// run the driver (spawn it, or drain it from its own scheduler).
    pub fn connect(
        session: Session,
        snapshot: Option<Vec<Message>>,
        gateway: Arc<dyn MailGateway>,
    ) -> (MailboxController, MirrorDriver) {
        let (calls, events, driver) = MirrorDriver::new(gateway, session.credentials());

        let store = MessageStore::with_messages(snapshot.unwrap_or_else(sample::starter_inbox));
        let selected = store.messages().first().map(|m| m.id.clone());

        let controller = MailboxController {
            session,
            store,
            active_folder: FolderKey::Inbox,
            search_query: String::new(),
            selected,
            compose: None,
            autosave: AutosaveTimer::new(),
            pending_confirm: None,
            toasts: ToastQueue::new(),
            theme_mode: ThemeMode::default(),
            theme_overrides: ThemeOverrides::default(),
            in_flight_fetches: 0,
            sending: false,
            next_local_id: 1,
            calls,
            events,
        };
        (controller, driver)
    }

    // === Folder and search ===

    /// Switch the active folder and refetch its scope.
    ///
    /// The selection is kept; a message can stay open while the list pane
    /// shows another folder.
    pub fn select_folder(&mut self, key: FolderKey) {
        self.active_folder = key;
        self.request_fetch(FetchScope::for_key(key));
    }

    /// Refetch the active folder's scope (the "Reload Mails" button)
    pub fn reload(&mut self) {
        self.request_fetch(FetchScope::for_key(self.active_folder));
    }

    /// Update the free-text search query; the view recomputes on read
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// The messages the list pane renders, in snapshot order
    pub fn visible(&self) -> Vec<&Message> {
        query::visible_messages(&self.store, self.active_folder, &self.search_query)
    }

    // === Selection and per-message actions ===

    /// Open a message. The first open flips `unread` exactly once and
    /// mirrors it; reopening is idempotent and fires no second call.
    pub fn select_message(&mut self, id: &MessageId) {
        let Some(msg) = self.store.find(id) else {
            return;
        };
        let was_unread = msg.unread;
        self.selected = Some(id.clone());
        if was_unread {
            self.store.set_unread(id, false);
            self.enqueue(RemoteCall::MarkRead(id.clone()));
        }
    }

    /// Close the reading pane
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn toggle_star(&mut self, id: &MessageId) {
        let Some(msg) = self.store.find(id) else {
            return;
        };
        let flagged = !msg.flagged;
        self.store.set_flagged(id, flagged);
        self.enqueue(RemoteCall::SetFlagged(id.clone(), flagged));
    }

    pub fn toggle_important(&mut self, id: &MessageId) {
        let Some(msg) = self.store.find(id) else {
            return;
        };
        let important = !msg.important;
        self.store.set_important(id, important);
        self.enqueue(RemoteCall::SetImportant(id.clone(), important));
    }

    /// Delete a message. Outside trash this is an optimistic move to trash;
    /// inside trash it becomes a pending permanent delete that must be
    /// confirmed before anything happens.
    pub fn delete(&mut self, id: &MessageId) {
        let Some(msg) = self.store.find(id) else {
            return;
        };
        if msg.folder == Folder::Trash {
            self.pending_confirm = Some(PendingConfirm::PermanentDelete(id.clone()));
            return;
        }
        self.store.set_folder(id, Folder::Trash);
        self.enqueue(RemoteCall::Move(id.clone(), Folder::Trash));
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
    }

    /// Move a trashed message back to the inbox
    pub fn restore(&mut self, id: &MessageId) {
        if self.store.find(id).is_none() {
            return;
        }
        self.store.set_folder(id, Folder::Inbox);
        self.enqueue(RemoteCall::Move(id.clone(), Folder::Inbox));
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
    }

    // === Destructive-action confirmation ===

    /// Ask to end the session; takes effect on [`confirm`]
    ///
    /// [`confirm`]: MailboxController::confirm
    pub fn request_logout(&mut self) {
        self.pending_confirm = Some(PendingConfirm::Logout);
    }

    pub fn pending_confirm(&self) -> Option<&PendingConfirm> {
        self.pending_confirm.as_ref()
    }

    /// Apply the pending destructive action, if any
    pub fn confirm(&mut self) -> Option<ConfirmOutcome> {
        match self.pending_confirm.take()? {
            PendingConfirm::PermanentDelete(id) => {
                self.store.remove(&id);
                self.enqueue(RemoteCall::Delete(id.clone()));
                if self.selected.as_ref() == Some(&id) {
                    self.selected = None;
                }
                Some(ConfirmOutcome::Deleted(id))
            }
            PendingConfirm::Logout => {
                if let Err(e) = self.session.forget() {
                    warn!("Failed to clear session marker: {e:#}");
                }
                Some(ConfirmOutcome::LoggedOut)
            }
        }
    }

    /// Drop the pending destructive action
    pub fn dismiss(&mut self) {
        self.pending_confirm = None;
    }

    // === Compose ===

    pub fn open_compose(&mut self) {
        if self.compose.is_none() {
            self.compose = Some(ComposeDraft::default());
        }
    }

    /// Edit the open draft; every edit restarts the autosave countdown
    pub fn edit_draft(&mut self, now: Instant, edit: impl FnOnce(&mut ComposeDraft)) {
        if let Some(draft) = self.compose.as_mut() {
            edit(draft);
            self.autosave.note_edit(now);
        }
    }

    /// Discard the compose surface and any pending autosave countdown
    pub fn close_compose(&mut self) {
        self.compose = None;
        self.autosave.cancel();
    }

    pub fn draft(&self) -> Option<&ComposeDraft> {
        self.compose.as_ref()
    }

    /// Send the open draft. All three fields are required locally; an
    /// incomplete draft is rejected before any remote call. The surface
    /// stays open (and the draft intact) until the send completes.
    pub fn send(&mut self) -> Result<(), SendError> {
        let Some(draft) = &self.compose else {
            return Err(SendError::ComposeClosed);
        };
        if !draft.is_complete() {
            return Err(SendError::Incomplete);
        }
        self.sending = true;
        self.autosave.cancel();
        self.enqueue(RemoteCall::Send {
            to: draft.to.clone(),
            subject: draft.subject.clone(),
            body: draft.body.clone(),
        });
        Ok(())
    }

    // === Theme and settings ===

    pub fn set_theme(&mut self, mode: ThemeMode) {
        if self.theme_mode == mode {
            return;
        }
        self.theme_mode = mode;
        self.enqueue(RemoteCall::SaveSettings(self.settings_payload()));
    }

    pub fn set_custom_colors(&mut self, text: Option<String>, background: Option<String>) {
        self.theme_overrides = ThemeOverrides { text, background };
        self.enqueue(RemoteCall::SaveSettings(self.settings_payload()));
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme_mode
    }

    /// The resolved color tokens for the current selection
    pub fn theme(&self) -> ThemeColors {
        theme::resolve(self.theme_mode, &self.theme_overrides)
    }

    fn settings_payload(&self) -> SettingsPayload {
        SettingsPayload {
            theme: self.theme_mode.as_str().to_string(),
            custom_text: self.theme_overrides.text.clone(),
            custom_background: self.theme_overrides.background.clone(),
        }
    }

    // === Event pump ===

    /// Drive timers and apply mirror completions.
    ///
    /// Hosts call this from their event loop; nothing here blocks.
    pub fn pump(&mut self, now: Instant) {
        if self.autosave.fire_if_due(now)
            && let Some(draft) = &self.compose
            && !draft.is_blank()
        {
            self.enqueue(RemoteCall::SaveDraft {
                to: draft.to.clone(),
                subject: draft.subject.clone(),
                body: draft.body.clone(),
            });
        }

        while let Ok(event) = self.events.try_recv() {
            self.handle_event(now, event);
        }
    }

    /// Apply one mirror completion.
    ///
    /// Fetch results overwrite the snapshot in arrival order: an older,
    /// slower response landing after a newer one wins. Last-completed-write
    /// is the accepted resolution, not a bug.
    fn handle_event(&mut self, now: Instant, event: MailboxEvent) {
        match event {
            MailboxEvent::FetchFinished { scope, result } => {
                self.in_flight_fetches = self.in_flight_fetches.saturating_sub(1);
                match result {
                    Ok(messages) => {
                        debug!("fetch {scope:?} finished with {} messages", messages.len());
                        self.store.replace_all(messages);
                        // The selection must always reference a message
                        // present in the store.
                        if let Some(id) = &self.selected
                            && self.store.find(id).is_none()
                        {
                            self.selected = None;
                        }
                    }
                    Err(error) => {
                        warn!("fetch {scope:?} failed: {error}");
                        self.toasts
                            .push("Couldn't refresh your mailbox.", ToastKind::Error, now);
                    }
                }
            }
            MailboxEvent::SendFinished { result } => {
                self.sending = false;
                match result {
                    Ok(()) => {
                        if let Some(draft) = self.compose.take() {
                            let sent = self.synthetic_sent_message(&draft);
                            self.store.prepend(sent);
                        }
                        self.autosave.cancel();
                        self.toasts.push("Message sent.", ToastKind::Info, now);
                    }
                    Err(error) => {
                        warn!("send failed: {error}");
                        self.toasts.push(
                            "Couldn't send your message. Please try again.",
                            ToastKind::Error,
                            now,
                        );
                    }
                }
            }
            MailboxEvent::MirrorFailed { call, error } => {
                // Non-fatal by contract; local state stays authoritative.
                warn!("{call} mirror failed: {error}");
            }
        }
    }

    /// The local record appended after a successful send
    fn synthetic_sent_message(&mut self, draft: &ComposeDraft) -> Message {
        let id = format!("local-{}", self.next_local_id);
        self.next_local_id += 1;
        Message::builder(id)
            .sender(self.session.user_name.clone())
            .sender_address(self.session.email.clone())
            .subject(draft.subject.clone())
            .preview(draft.body.chars().take(100).collect::<String>())
            .body(draft.body.clone())
            .date(SENT_JUST_NOW)
            .avatar(format!("https://i.pravatar.cc/100?u={}", self.session.email))
            .folder(Folder::Sent)
            .build()
    }

    fn request_fetch(&mut self, scope: FetchScope) {
        self.in_flight_fetches += 1;
        self.enqueue(RemoteCall::Fetch(scope));
    }

    fn enqueue(&self, call: RemoteCall) {
        debug!("enqueue remote call: {call:?}");
        if self.calls.send(call).is_err() {
            warn!("mirror driver disconnected; dropping remote call");
        }
    }

    // === Read accessors ===

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn active_folder(&self) -> FolderKey {
        self.active_folder
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn selected_message(&self) -> Option<&Message> {
        self.selected.as_ref().and_then(|id| self.store.find(id))
    }

    /// Whether any folder fetch is still in flight (the reload spinner)
    pub fn is_syncing(&self) -> bool {
        self.in_flight_fetches > 0
    }

    /// Whether a send is still in flight (the send button disable)
    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Live toasts, oldest first; expired ones are pruned on read
    pub fn toasts(&mut self, now: Instant) -> &[Toast] {
        self.toasts.active(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{Credentials, LoginError, LoginOutcome};
    use anyhow::Result;

    /// Gateway whose fetches succeed with fixed payloads
    struct FixedGateway;

    impl MailGateway for FixedGateway {
        fn login(&self, email: &str, _password: &str) -> Result<LoginOutcome, LoginError> {
            Ok(LoginOutcome {
                user_name: None,
                email: email.to_string(),
                inbox: None,
            })
        }

        fn fetch_inbox(&self, _creds: &Credentials) -> Result<Vec<Message>> {
            Ok(vec![
                Message::builder("i1").sender("A").subject("inbox one").build(),
            ])
        }

        fn fetch_folder(&self, _creds: &Credentials, folder: Folder) -> Result<Vec<Message>> {
            Ok(vec![
                Message::builder("f1")
                    .sender("B")
                    .subject("folder one")
                    .folder(folder)
                    .build(),
            ])
        }

        fn send_mail(&self, _: &Credentials, _: &str, _: &str, _: &str) -> Result<()> {
            Ok(())
        }
        fn move_mail(&self, _: &Credentials, _: &MessageId, _: Folder) -> Result<()> {
            Ok(())
        }
        fn delete_mail(&self, _: &Credentials, _: &MessageId) -> Result<()> {
            Ok(())
        }
        fn mark_read(&self, _: &Credentials, _: &MessageId) -> Result<()> {
            Ok(())
        }
        fn toggle_star(&self, _: &Credentials, _: &MessageId, _: bool) -> Result<()> {
            Ok(())
        }
        fn toggle_important(&self, _: &Credentials, _: &MessageId, _: bool) -> Result<()> {
            Ok(())
        }
        fn save_draft(&self, _: &Credentials, _: &str, _: &str, _: &str) -> Result<()> {
            Ok(())
        }
        fn save_settings(
            &self,
            _: &Credentials,
            _: &crate::gateway::api::SettingsPayload,
        ) -> Result<()> {
            Ok(())
        }
    }

    fn controller_with(snapshot: Vec<Message>) -> (MailboxController, MirrorDriver) {
        MailboxController::connect(
            Session::new("Test User", "test@example.com", "pw"),
            Some(snapshot),
            Arc::new(FixedGateway),
        )
    }

    fn inbox_msg(id: &str, unread: bool) -> Message {
        Message::builder(id)
            .sender("Sender")
            .subject(format!("Subject {id}"))
            .unread(unread)
            .build()
    }

    #[test]
    fn test_initial_selection_is_first_message() {
        let (controller, _driver) =
            controller_with(vec![inbox_msg("1", true), inbox_msg("2", false)]);
        assert_eq!(controller.selected_message().unwrap().id.as_str(), "1");
        // Initial selection is presentation only; unread is untouched.
        assert!(controller.selected_message().unwrap().unread);
    }

    #[test]
    fn test_empty_snapshot_falls_back_to_starter_inbox() {
        let (controller, _driver) = MailboxController::connect(
            Session::new("Test User", "test@example.com", "pw"),
            None,
            Arc::new(FixedGateway),
        );
        assert!(!controller.store().is_empty());
    }

    #[test]
    fn test_out_of_order_fetch_completion_last_write_wins() {
        let (mut controller, _driver) = controller_with(vec![inbox_msg("old", false)]);
        let now = Instant::now();

        // Requests went out as inbox then sent, but the sent response
        // arrives first and the slower inbox response last.
        controller.select_folder(FolderKey::Inbox);
        controller.select_folder(FolderKey::Sent);

        let sent = vec![
            Message::builder("s1").sender("B").subject("sent").folder(Folder::Sent).build(),
        ];
        let inbox = vec![inbox_msg("i1", true)];

        controller.handle_event(
            now,
            MailboxEvent::FetchFinished {
                scope: FetchScope::Folder(Folder::Sent),
                result: Ok(sent),
            },
        );
        controller.handle_event(
            now,
            MailboxEvent::FetchFinished {
                scope: FetchScope::Inbox,
                result: Ok(inbox),
            },
        );

        assert!(!controller.is_syncing());
        assert_eq!(controller.store().len(), 1);
        assert!(controller.store().find(&MessageId::new("i1")).is_some());
    }

    #[test]
    fn test_fetch_apply_drops_dangling_selection() {
        let (mut controller, _driver) = controller_with(vec![inbox_msg("1", false)]);
        let now = Instant::now();
        controller.select_message(&MessageId::new("1"));

        controller.handle_event(
            now,
            MailboxEvent::FetchFinished {
                scope: FetchScope::Inbox,
                result: Ok(vec![inbox_msg("2", false)]),
            },
        );
        assert!(controller.selected_message().is_none());
    }

    #[test]
    fn test_fetch_failure_raises_toast_and_keeps_store() {
        let (mut controller, _driver) = controller_with(vec![inbox_msg("1", false)]);
        let now = Instant::now();
        controller.reload();
        assert!(controller.is_syncing());

        controller.handle_event(
            now,
            MailboxEvent::FetchFinished {
                scope: FetchScope::Inbox,
                result: Err("boom".to_string()),
            },
        );
        assert!(!controller.is_syncing());
        assert_eq!(controller.store().len(), 1);
        assert_eq!(controller.toasts(now).len(), 1);
        assert_eq!(controller.toasts(now)[0].kind, ToastKind::Error);
    }

    #[test]
    fn test_send_failure_keeps_draft_open() {
        let (mut controller, _driver) = controller_with(vec![]);
        let now = Instant::now();
        controller.open_compose();
        controller.edit_draft(now, |d| {
            d.to = "x@y.com".to_string();
            d.subject = "Hi".to_string();
            d.body = "Hello".to_string();
        });
        controller.send().unwrap();
        assert!(controller.is_sending());

        controller.handle_event(
            now,
            MailboxEvent::SendFinished {
                result: Err("down".to_string()),
            },
        );
        assert!(!controller.is_sending());
        assert_eq!(controller.draft().unwrap().subject, "Hi");
        assert_eq!(controller.store().len(), 0);
        assert_eq!(controller.toasts(now).len(), 1);
    }

    #[test]
    fn test_send_success_appends_synthetic_and_closes_compose() {
        let (mut controller, _driver) = controller_with(vec![inbox_msg("1", false)]);
        let now = Instant::now();
        controller.open_compose();
        controller.edit_draft(now, |d| {
            d.to = "x@y.com".to_string();
            d.subject = "Hi".to_string();
            d.body = "Hello".to_string();
        });
        controller.send().unwrap();
        controller.handle_event(now, MailboxEvent::SendFinished { result: Ok(()) });

        assert!(controller.draft().is_none());
        let first = &controller.store().messages()[0];
        assert_eq!(first.folder, Folder::Sent);
        assert_eq!(first.subject, "Hi");
        assert_eq!(first.sender, "Test User");
        assert_eq!(first.date, SENT_JUST_NOW);
        assert!(!first.unread);
    }

    #[test]
    fn test_theme_defaults_and_switch() {
        let (mut controller, _driver) = controller_with(vec![]);
        assert_eq!(controller.theme_mode(), ThemeMode::Light);
        controller.set_theme(ThemeMode::Dark);
        assert_eq!(controller.theme().sidebar_bg, "#0B0C0D");
    }
}
