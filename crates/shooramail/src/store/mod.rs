//! Message store: the in-memory mailbox snapshot
//!
//! The store is exclusively owned by one mailbox controller for the lifetime
//! of a dashboard session and only ever mutated from that controller's
//! thread, so it needs no interior locking. Iteration order is the order
//! messages arrived in (the gateway's order), with locally created messages
//! prepended.

use crate::models::{Folder, Message, MessageId};

/// Ordered in-memory collection of the current mailbox snapshot
#[derive(Debug, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
}

impl MessageStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Create a store holding the given snapshot
    pub fn with_messages(messages: Vec<Message>) -> Self {
        let mut store = Self::new();
        store.replace_all(messages);
        store
    }

    /// Discard the previous snapshot and install a new one.
    ///
    /// The gateway's payload shape is not contractually fixed, so entries
    /// with a blank subject or sender are defaulted to placeholders rather
    /// than rejected.
    pub fn replace_all(&mut self, messages: Vec<Message>) {
        self.messages = messages
            .into_iter()
            .map(|mut msg| {
                if msg.subject.trim().is_empty() {
                    msg.subject = Message::NO_SUBJECT.to_string();
                }
                if msg.sender.trim().is_empty() {
                    msg.sender = Message::UNKNOWN_SENDER.to_string();
                }
                msg
            })
            .collect();
    }

    /// Find a message by ID. O(n) scan; mailboxes here are UI-page-sized.
    pub fn find(&self, id: &MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| &m.id == id)
    }

    fn find_mut(&mut self, id: &MessageId) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| &m.id == id)
    }

    /// Set the unread marker. Unknown IDs are a no-op.
    pub fn set_unread(&mut self, id: &MessageId, unread: bool) {
        if let Some(msg) = self.find_mut(id) {
            msg.unread = unread;
        }
    }

    /// Set the starred/flagged marker. Unknown IDs are a no-op.
    pub fn set_flagged(&mut self, id: &MessageId, flagged: bool) {
        if let Some(msg) = self.find_mut(id) {
            msg.flagged = flagged;
        }
    }

    /// Set the important marker. Unknown IDs are a no-op.
    pub fn set_important(&mut self, id: &MessageId, important: bool) {
        if let Some(msg) = self.find_mut(id) {
            msg.important = important;
        }
    }

    /// Move a message to another folder. Unknown IDs are a no-op.
    pub fn set_folder(&mut self, id: &MessageId, folder: Folder) {
        if let Some(msg) = self.find_mut(id) {
            msg.folder = folder;
        }
    }

    /// Physically delete a message (permanent delete from trash).
    pub fn remove(&mut self, id: &MessageId) {
        self.messages.retain(|m| &m.id != id);
    }

    /// Insert a locally created message at the front of the sequence
    /// (the list pane shows newest-first for local sends).
    pub fn prepend(&mut self, message: Message) {
        self.messages.insert(0, message);
    }

    /// Lazy, restartable iteration over messages matching a predicate,
    /// in snapshot order.
    pub fn filter<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a Message>
    where
        P: Fn(&Message) -> bool + 'a,
    {
        self.messages.iter().filter(move |m| predicate(m))
    }

    /// All messages in snapshot order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
