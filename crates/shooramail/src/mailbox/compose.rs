//! Compose draft and autosave timing
//!
//! The autosave timer is clock-injected so tests never sleep: every edit
//! restarts a fixed idle countdown, and the controller polls the timer from
//! its event pump.

use std::time::{Duration, Instant};

/// Idle window after the last edit before a draft autosave fires
pub const AUTOSAVE_IDLE: Duration = Duration::from_secs(2);

/// The three compose fields, all required before send
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeDraft {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl ComposeDraft {
    /// Whether every field has content (the local send precondition)
    pub fn is_complete(&self) -> bool {
        !self.to.trim().is_empty()
            && !self.subject.trim().is_empty()
            && !self.body.trim().is_empty()
    }

    /// Whether nothing has been typed yet (nothing worth autosaving)
    pub fn is_blank(&self) -> bool {
        self.to.trim().is_empty() && self.subject.trim().is_empty() && self.body.trim().is_empty()
    }
}

/// Edit-restarted countdown for draft autosave
#[derive(Debug, Default)]
pub struct AutosaveTimer {
    deadline: Option<Instant>,
}

impl AutosaveTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart the countdown; called on every draft edit
    pub fn note_edit(&mut self, now: Instant) {
        self.deadline = Some(now + AUTOSAVE_IDLE);
    }

    /// Drop any pending countdown; called when the compose surface closes
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether the countdown has expired. Firing disarms the timer until
    /// the next edit, so one idle window saves at most once.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}
