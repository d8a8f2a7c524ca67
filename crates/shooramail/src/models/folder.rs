//! Folder and category models
//!
//! A message lives in exactly one folder at a time. Categories are an
//! orthogonal tag used for filtering independent of folder.

use serde::{Deserialize, Serialize};

/// A mailbox location a message belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Folder {
    Inbox,
    Sent,
    Drafts,
    Trash,
    Snoozed,
    Scheduled,
}

impl Folder {
    /// All folders, in sidebar order
    pub const ALL: [Folder; 6] = [
        Folder::Inbox,
        Folder::Snoozed,
        Folder::Sent,
        Folder::Scheduled,
        Folder::Drafts,
        Folder::Trash,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Folder::Inbox => "inbox",
            Folder::Sent => "sent",
            Folder::Drafts => "drafts",
            Folder::Trash => "trash",
            Folder::Snoozed => "snoozed",
            Folder::Scheduled => "scheduled",
        }
    }

    /// Parse a folder from its wire name (case-insensitive)
    pub fn parse(s: &str) -> Option<Folder> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inbox" => Some(Folder::Inbox),
            "sent" => Some(Folder::Sent),
            "drafts" => Some(Folder::Drafts),
            "trash" => Some(Folder::Trash),
            "snoozed" => Some(Folder::Snoozed),
            "scheduled" => Some(Folder::Scheduled),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Folder::Inbox => "Inbox",
            Folder::Sent => "Sent",
            Folder::Drafts => "Drafts",
            Folder::Trash => "Trash",
            Folder::Snoozed => "Snoozed",
            Folder::Scheduled => "Scheduled",
        }
    }
}

/// A secondary tag orthogonal to the folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    Personal,
    Promotions,
}

impl Category {
    /// All categories, in sidebar order
    pub const ALL: [Category; 3] = [Category::Work, Category::Personal, Category::Promotions];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Personal => "personal",
            Category::Promotions => "promotions",
        }
    }

    /// Parse a category from its wire name (case-insensitive)
    pub fn parse(s: &str) -> Option<Category> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" => Some(Category::Work),
            "personal" => Some(Category::Personal),
            "promotions" => Some(Category::Promotions),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::Promotions => "Promotions",
        }
    }

    /// Accent color shown next to the category in the sidebar and list
    pub fn accent_color(&self) -> &'static str {
        match self {
            Category::Work => "#34A853",
            Category::Personal => "#FFB800",
            Category::Promotions => "#2D62ED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_round_trip() {
        for folder in Folder::ALL {
            assert_eq!(Folder::parse(folder.as_str()), Some(folder));
        }
    }

    #[test]
    fn test_folder_parse_case_insensitive() {
        assert_eq!(Folder::parse("Inbox"), Some(Folder::Inbox));
        assert_eq!(Folder::parse("TRASH"), Some(Folder::Trash));
        assert_eq!(Folder::parse("  sent "), Some(Folder::Sent));
    }

    #[test]
    fn test_folder_parse_unknown() {
        assert_eq!(Folder::parse("outbox"), None);
        assert_eq!(Folder::parse(""), None);
    }

    #[test]
    fn test_category_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_category_accent_colors_distinct() {
        assert_ne!(Category::Work.accent_color(), Category::Personal.accent_color());
        assert_ne!(Category::Personal.accent_color(), Category::Promotions.accent_color());
    }
}
