//! Query layer: folder selectors, filter predicates, and derived counts
//!
//! Pure functions over the message store. The view controller derives the
//! visible message list from these on every interaction; nothing here
//! mutates state.

use crate::models::{Category, Folder, Message};
use crate::store::MessageStore;

/// The active folder/category selector in the sidebar.
///
/// Folder keys are a superset of [`Folder`]: starred, important and the
/// category keys are virtual views over the same snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FolderKey {
    Inbox,
    Starred,
    Snoozed,
    Important,
    Sent,
    Scheduled,
    Drafts,
    All,
    Trash,
    Category(Category),
}

impl FolderKey {
    /// All selectors, in sidebar order
    pub const SIDEBAR: [FolderKey; 12] = [
        FolderKey::Inbox,
        FolderKey::Starred,
        FolderKey::Snoozed,
        FolderKey::Important,
        FolderKey::Sent,
        FolderKey::Scheduled,
        FolderKey::Drafts,
        FolderKey::All,
        FolderKey::Trash,
        FolderKey::Category(Category::Work),
        FolderKey::Category(Category::Personal),
        FolderKey::Category(Category::Promotions),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FolderKey::Inbox => "inbox",
            FolderKey::Starred => "starred",
            FolderKey::Snoozed => "snoozed",
            FolderKey::Important => "important",
            FolderKey::Sent => "sent",
            FolderKey::Scheduled => "scheduled",
            FolderKey::Drafts => "drafts",
            FolderKey::All => "all",
            FolderKey::Trash => "trash",
            FolderKey::Category(category) => category.as_str(),
        }
    }

    /// Parse a selector from its wire name (case-insensitive)
    pub fn parse(s: &str) -> Option<FolderKey> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inbox" => Some(FolderKey::Inbox),
            "starred" => Some(FolderKey::Starred),
            "snoozed" => Some(FolderKey::Snoozed),
            "important" => Some(FolderKey::Important),
            "sent" => Some(FolderKey::Sent),
            "scheduled" => Some(FolderKey::Scheduled),
            "drafts" => Some(FolderKey::Drafts),
            "all" => Some(FolderKey::All),
            "trash" => Some(FolderKey::Trash),
            other => Category::parse(other).map(FolderKey::Category),
        }
    }

    /// Heading shown above the message list
    pub fn display_name(&self) -> &'static str {
        match self {
            FolderKey::Inbox => "Inbox",
            FolderKey::Starred => "Starred",
            FolderKey::Snoozed => "Snoozed",
            FolderKey::Important => "Important",
            FolderKey::Sent => "Sent",
            FolderKey::Scheduled => "Scheduled",
            FolderKey::Drafts => "Drafts",
            FolderKey::All => "All Mails",
            FolderKey::Trash => "Trash",
            FolderKey::Category(category) => category.display_name(),
        }
    }
}

/// Whether a message belongs to the given selector.
///
/// Categories never show trashed mail; "all" is everything except trash.
pub fn folder_predicate(key: FolderKey, msg: &Message) -> bool {
    match key {
        FolderKey::Inbox => msg.folder == Folder::Inbox,
        FolderKey::Starred => msg.flagged,
        FolderKey::Snoozed => msg.folder == Folder::Snoozed,
        FolderKey::Important => msg.important,
        FolderKey::Sent => msg.folder == Folder::Sent,
        FolderKey::Scheduled => msg.folder == Folder::Scheduled,
        FolderKey::Drafts => msg.folder == Folder::Drafts,
        FolderKey::All => msg.folder != Folder::Trash,
        FolderKey::Trash => msg.folder == Folder::Trash,
        FolderKey::Category(category) => {
            msg.category == category && msg.folder != Folder::Trash
        }
    }
}

/// Case-insensitive substring match across subject, sender and preview.
/// The empty query matches everything.
pub fn matches_search(query: &str, msg: &Message) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    msg.subject.to_lowercase().contains(&needle)
        || msg.sender.to_lowercase().contains(&needle)
        || msg.preview.to_lowercase().contains(&needle)
}

/// The messages the list pane renders for a selector and search query,
/// in snapshot order.
pub fn visible_messages<'a>(
    store: &'a MessageStore,
    key: FolderKey,
    query: &'a str,
) -> Vec<&'a Message> {
    store
        .filter(move |m| folder_predicate(key, m) && matches_search(query, m))
        .collect()
}

/// Sidebar badge count for one selector
pub fn folder_count(store: &MessageStore, key: FolderKey) -> usize {
    store.filter(|m| folder_predicate(key, m)).count()
}

/// Unread mail in the inbox (the Inbox badge counts unread, not total)
pub fn unread_inbox_count(store: &MessageStore) -> usize {
    store
        .filter(|m| m.folder == Folder::Inbox && m.unread)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageId;

    fn msg(id: &str) -> Message {
        Message::builder(id)
            .sender("Sender")
            .subject(format!("Subject {id}"))
            .preview("preview text")
            .build()
    }

    /// One message per row of the predicate table
    fn table_store() -> MessageStore {
        let mut inbox = msg("inbox");
        inbox.folder = Folder::Inbox;

        let mut starred = msg("starred");
        starred.folder = Folder::Sent;
        starred.flagged = true;

        let mut snoozed = msg("snoozed");
        snoozed.folder = Folder::Snoozed;

        let mut important = msg("important");
        important.folder = Folder::Inbox;
        important.important = true;

        let mut sent = msg("sent");
        sent.folder = Folder::Sent;

        let mut scheduled = msg("scheduled");
        scheduled.folder = Folder::Scheduled;

        let mut drafts = msg("drafts");
        drafts.folder = Folder::Drafts;

        let mut trash = msg("trash");
        trash.folder = Folder::Trash;

        let mut trash_work = msg("trash-work");
        trash_work.folder = Folder::Trash;
        trash_work.category = Category::Work;

        let mut work = msg("work");
        work.folder = Folder::Inbox;
        work.category = Category::Work;

        MessageStore::with_messages(vec![
            inbox, starred, snoozed, important, sent, scheduled, drafts, trash, trash_work, work,
        ])
    }

    fn ids(store: &MessageStore, key: FolderKey) -> Vec<String> {
        visible_messages(store, key, "")
            .into_iter()
            .map(|m| m.id.as_str().to_string())
            .collect()
    }

    #[test]
    fn test_predicate_table() {
        let store = table_store();

        assert_eq!(ids(&store, FolderKey::Inbox), vec!["inbox", "important", "work"]);
        assert_eq!(ids(&store, FolderKey::Starred), vec!["starred"]);
        assert_eq!(ids(&store, FolderKey::Snoozed), vec!["snoozed"]);
        assert_eq!(ids(&store, FolderKey::Important), vec!["important"]);
        assert_eq!(ids(&store, FolderKey::Sent), vec!["starred", "sent"]);
        assert_eq!(ids(&store, FolderKey::Scheduled), vec!["scheduled"]);
        assert_eq!(ids(&store, FolderKey::Drafts), vec!["drafts"]);
        assert_eq!(ids(&store, FolderKey::Trash), vec!["trash", "trash-work"]);
    }

    #[test]
    fn test_all_excludes_trash() {
        let store = table_store();
        let all = ids(&store, FolderKey::All);
        assert!(!all.contains(&"trash".to_string()));
        assert!(!all.contains(&"trash-work".to_string()));
        assert_eq!(all.len(), store.len() - 2);
    }

    #[test]
    fn test_category_excludes_trash() {
        let store = table_store();
        assert_eq!(
            ids(&store, FolderKey::Category(Category::Work)),
            vec!["work"]
        );
    }

    #[test]
    fn test_filter_preserves_relative_order() {
        let store = table_store();
        // Inbox rows come back in the order they were installed.
        assert_eq!(ids(&store, FolderKey::Inbox), vec!["inbox", "important", "work"]);
    }

    #[test]
    fn test_empty_search_matches_all() {
        let store = table_store();
        let inbox = visible_messages(&store, FolderKey::Inbox, "");
        assert_eq!(inbox.len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let m = msg("1");
        assert!(matches_search("subject 1", &m));
        assert!(matches_search("SENDER", &m));
        assert!(matches_search("preview", &m));
        assert!(!matches_search("nope", &m));
    }

    #[test]
    fn test_unmatched_search_yields_empty() {
        let store = table_store();
        let none = visible_messages(&store, FolderKey::All, "zzz-not-present");
        assert!(none.is_empty());
    }

    #[test]
    fn test_folder_key_round_trip() {
        for key in FolderKey::SIDEBAR {
            assert_eq!(FolderKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(FolderKey::parse("Promotions"), Some(FolderKey::Category(Category::Promotions)));
        assert_eq!(FolderKey::parse("archive"), None);
    }

    #[test]
    fn test_unread_inbox_count() {
        let mut store = table_store();
        assert_eq!(unread_inbox_count(&store), 0);
        store.set_unread(&MessageId::new("inbox"), true);
        store.set_unread(&MessageId::new("sent"), true);
        assert_eq!(unread_inbox_count(&store), 1);
    }

    #[test]
    fn test_folder_count_uses_table() {
        let store = table_store();
        assert_eq!(folder_count(&store, FolderKey::Trash), 2);
        assert_eq!(folder_count(&store, FolderKey::All), 8);
    }
}
