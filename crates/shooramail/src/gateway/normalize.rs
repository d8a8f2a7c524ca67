//! Backend payload normalization
//!
//! Maps the backend's loose message records into domain models. Missing
//! fields are defaulted, never rejected; the upstream payload shape is not
//! contractually fixed.

use chrono::Local;

use super::api::RawMail;
use crate::models::{Category, Folder, Message};

/// Longest preview derived from a body when the backend sends no snippet
const PREVIEW_CHARS: usize = 100;

/// Normalize a full fetch payload, preserving its order.
///
/// `default_folder` is the folder the fetch was scoped to; records that
/// name their own folder keep it.
pub fn normalize_mails(mails: Vec<RawMail>, default_folder: Folder) -> Vec<Message> {
    mails
        .into_iter()
        .enumerate()
        .map(|(index, raw)| normalize_mail(raw, index, default_folder))
        .collect()
}

/// Normalize one backend record into a Message
pub fn normalize_mail(raw: RawMail, index: usize, default_folder: Folder) -> Message {
    let id = raw
        .id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| (index + 1).to_string());

    let sender = first_non_blank([raw.sender, raw.from]);
    let body = first_non_blank([raw.body, raw.text]).unwrap_or_default();
    let preview = first_non_blank([raw.preview, raw.snippet])
        .unwrap_or_else(|| body.chars().take(PREVIEW_CHARS).collect());

    let folder = raw
        .folder
        .as_deref()
        .and_then(Folder::parse)
        .unwrap_or(default_folder);
    let category = raw
        .category
        .as_deref()
        .and_then(Category::parse)
        .unwrap_or(Category::Personal);

    let mut builder = Message::builder(id)
        .subject(raw.subject.unwrap_or_default())
        .preview(preview)
        .body(body)
        .date(
            raw.date
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(today_display_date),
        )
        // New mail defaults to unread unless the backend says otherwise.
        .unread(raw.unread.unwrap_or(true))
        .flagged(raw.flagged.unwrap_or(false))
        .important(raw.important.unwrap_or(false))
        .category(category)
        .has_attachments(raw.attachments.unwrap_or(false))
        .folder(folder);

    if let Some(sender) = sender {
        builder = builder.sender(sender);
    }
    if let Some(avatar) = raw.avatar.filter(|a| !a.trim().is_empty()) {
        builder = builder.avatar(avatar);
    }

    builder.build()
}

/// First option whose value isn't blank
fn first_non_blank<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
}

/// Display date for records that arrive without one (e.g. "June 25")
fn today_display_date() -> String {
    Local::now().format("%B %-d").to_string()
}
