//! Starter inbox shown when the backend provides no snapshot

use crate::models::{Category, Folder, Message};

/// The fixed starter messages a fresh dashboard opens with
pub fn starter_inbox() -> Vec<Message> {
    vec![
        Message::builder("1")
            .sender("Google")
            .subject("Manual Account Verification")
            .preview(
                "Hello 7ahang, Your account has been verified successfully. Please review your \
                 security settings to ensure everything is up to date.",
            )
            .body(
                "Hello 7ahang,\n\nYour account has been verified successfully. Please review \
                 your security settings to ensure everything is up to date.\n\nBest,\nGoogle Team",
            )
            .date("June 25")
            .unread(true)
            .category(Category::Promotions)
            .avatar("https://i.pravatar.cc/100?u=google")
            .folder(Folder::Inbox)
            .build(),
        Message::builder("2")
            .sender("Medium")
            .subject("Today's highlights: Design Trends 2024")
            .preview(
                "Tint and shade are areas of color theory that many beginners overlook. In this \
                 week's highlights, we dive deep into...",
            )
            .body(
                "Tint and shade are areas of color theory that many beginners overlook. In this \
                 week's highlights, we dive deep into the nuances of color palettes in modern \
                 web design.",
            )
            .date("June 23")
            .unread(true)
            .category(Category::Promotions)
            .avatar("https://i.pravatar.cc/100?u=medium")
            .folder(Folder::Inbox)
            .build(),
        Message::builder("3")
            .sender("Tamas Bunce")
            .subject("Work Enquiry - New Project")
            .preview(
                "This is Tamas who contacted you on Dribbble regarding the brand identity \
                 project. I was wondering if you had time for a quick call next week...",
            )
            .body(
                "Hi,\n\nThis is Tamas who contacted you on Dribbble regarding the brand \
                 identity project. I was wondering if you had time for a quick call next week \
                 to discuss the details?\n\nThanks, Tamas",
            )
            .date("June 22")
            .category(Category::Work)
            .has_attachments(true)
            .avatar("https://i.pravatar.cc/100?u=tamas")
            .folder(Folder::Inbox)
            .build(),
        Message::builder("4")
            .sender("Slack")
            .subject("Now's the perfect time to upgrade")
            .preview(
                "That's okay! If you want to learn more about our new enterprise features, \
                 we've attached a full guide below...",
            )
            .body(
                "That's okay! If you want to learn more about our new enterprise features, \
                 we've attached a full guide below. Check out the new pricing plans.",
            )
            .date("June 19")
            .flagged(true)
            .category(Category::Personal)
            .avatar("https://i.pravatar.cc/100?u=slack")
            .folder(Folder::Inbox)
            .build(),
    ]
}
