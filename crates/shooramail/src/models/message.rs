//! Message model representing one email in the mailbox snapshot

use serde::{Deserialize, Serialize};

use super::{Category, Folder};

/// Unique identifier for a message within the store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MessageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A single email message
///
/// Fields mirror what the dashboard renders: a display sender, a short
/// preview for the list pane, the full body for the reading pane, and the
/// unread/flagged/important markers the toolbar toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Store-unique message ID
    pub id: MessageId,
    /// Sender display name
    pub sender: String,
    /// Sender email address
    pub sender_address: String,
    /// Subject line
    pub subject: String,
    /// Short snippet shown in the message list
    pub preview: String,
    /// Full body (plain text or an HTML fragment)
    pub body: String,
    /// Human-readable display date (e.g. "June 25")
    pub date: String,
    /// Unread marker; flips false exactly once when the message is opened
    pub unread: bool,
    /// Starred/flagged marker
    pub flagged: bool,
    /// Important marker
    pub important: bool,
    /// Category tag, orthogonal to the folder
    pub category: Category,
    /// Whether the message carries attachments
    pub has_attachments: bool,
    /// Avatar image URL for the sender
    pub avatar: String,
    /// Folder the message currently lives in
    pub folder: Folder,
}

impl Message {
    /// Placeholder subject for messages that arrive without one
    pub const NO_SUBJECT: &'static str = "(No Subject)";
    /// Placeholder sender for messages that arrive without one
    pub const UNKNOWN_SENDER: &'static str = "Unknown Sender";

    /// Create a new message builder
    pub fn builder(id: impl Into<MessageId>) -> MessageBuilder {
        MessageBuilder::new(id.into())
    }
}

/// Builder for creating Message instances
pub struct MessageBuilder {
    id: MessageId,
    sender: String,
    sender_address: Option<String>,
    subject: String,
    preview: String,
    body: String,
    date: String,
    unread: bool,
    flagged: bool,
    important: bool,
    category: Category,
    has_attachments: bool,
    avatar: Option<String>,
    folder: Folder,
}

impl MessageBuilder {
    fn new(id: MessageId) -> Self {
        Self {
            id,
            sender: String::new(),
            sender_address: None,
            subject: String::new(),
            preview: String::new(),
            body: String::new(),
            date: String::new(),
            unread: false,
            flagged: false,
            important: false,
            category: Category::Personal,
            has_attachments: false,
            avatar: None,
            folder: Folder::Inbox,
        }
    }

    pub fn sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = sender.into();
        self
    }

    pub fn sender_address(mut self, address: impl Into<String>) -> Self {
        self.sender_address = Some(address.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn preview(mut self, preview: impl Into<String>) -> Self {
        self.preview = preview.into();
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn unread(mut self, unread: bool) -> Self {
        self.unread = unread;
        self
    }

    pub fn flagged(mut self, flagged: bool) -> Self {
        self.flagged = flagged;
        self
    }

    pub fn important(mut self, important: bool) -> Self {
        self.important = important;
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn has_attachments(mut self, has_attachments: bool) -> Self {
        self.has_attachments = has_attachments;
        self
    }

    pub fn avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    pub fn folder(mut self, folder: Folder) -> Self {
        self.folder = folder;
        self
    }

    pub fn build(self) -> Message {
        let sender = if self.sender.trim().is_empty() {
            Message::UNKNOWN_SENDER.to_string()
        } else {
            self.sender
        };
        let sender_address = self
            .sender_address
            .unwrap_or_else(|| derive_address(&sender));
        let avatar = self.avatar.unwrap_or_else(|| derive_avatar(&sender));

        Message {
            id: self.id,
            sender,
            sender_address,
            subject: if self.subject.trim().is_empty() {
                Message::NO_SUBJECT.to_string()
            } else {
                self.subject
            },
            preview: self.preview,
            body: self.body,
            date: self.date,
            unread: self.unread,
            flagged: self.flagged,
            important: self.important,
            category: self.category,
            has_attachments: self.has_attachments,
            avatar,
            folder: self.folder,
        }
    }
}

/// Derive a display address for senders that arrive without one
fn derive_address(sender: &str) -> String {
    let local = sender.to_lowercase().replace(char::is_whitespace, ".");
    format!("{local}@official.com")
}

/// Derive an avatar URL keyed by the sender name
fn derive_avatar(sender: &str) -> String {
    format!("https://i.pravatar.cc/100?u={}", sender.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let msg = Message::builder("m1").build();
        assert_eq!(msg.id.as_str(), "m1");
        assert_eq!(msg.sender, Message::UNKNOWN_SENDER);
        assert_eq!(msg.subject, Message::NO_SUBJECT);
        assert_eq!(msg.folder, Folder::Inbox);
        assert_eq!(msg.category, Category::Personal);
        assert!(!msg.unread);
        assert!(!msg.flagged);
        assert!(!msg.important);
    }

    #[test]
    fn test_builder_derives_address_and_avatar() {
        let msg = Message::builder("m1").sender("Tamas Bunce").build();
        assert_eq!(msg.sender_address, "tamas.bunce@official.com");
        assert_eq!(msg.avatar, "https://i.pravatar.cc/100?u=tamas bunce");
    }

    #[test]
    fn test_builder_keeps_explicit_address() {
        let msg = Message::builder("m1")
            .sender("Google")
            .sender_address("no-reply@google.com")
            .build();
        assert_eq!(msg.sender_address, "no-reply@google.com");
    }

    #[test]
    fn test_blank_subject_gets_placeholder() {
        let msg = Message::builder("m1").subject("   ").build();
        assert_eq!(msg.subject, Message::NO_SUBJECT);
    }
}
