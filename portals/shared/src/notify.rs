//! Non-blocking notification display.
//!
//! Notifications stack when triggered repeatedly and auto-dismiss after a
//! fixed interval. Dismissal runs through the deferred task queue, so each
//! pending dismissal has a cancellable handle instead of a dangling timer.

use crate::tasks::TaskQueue;

/// Dismissal delay for a visible notification.
pub const DISMISS_AFTER_MS: u64 = 3_000;

/// Notification severity, controls presentation only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single visible notification.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
}

/// Stack of visible notifications with scheduled dismissals.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    next_id: u64,
    visible: Vec<Notification>,
    dismissals: TaskQueue<u64>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a notification and schedule its dismissal
    /// [`DISMISS_AFTER_MS`] after `now_ms`.
    pub fn notify(&mut self, now_ms: u64, message: impl Into<String>, severity: Severity) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.visible.push(Notification {
            id,
            message: message.into(),
            severity,
        });
        self.dismissals.schedule(now_ms + DISMISS_AFTER_MS, id);
        id
    }

    /// Drop every notification whose dismissal is due.
    pub fn advance_to(&mut self, now_ms: u64) {
        for id in self.dismissals.advance_to(now_ms) {
            self.visible.retain(|n| n.id != id);
        }
    }

    /// Currently visible notifications, oldest first.
    pub fn visible(&self) -> &[Notification] {
        &self.visible
    }
}
