use std::time::Duration;
use tokio::time::Instant;

/// How long a notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub expires_at: Instant,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationKind, now: Instant) -> Self {
        Self { message: message.into(), kind, expires_at: now + NOTIFICATION_TTL }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Notifications currently on screen, oldest first.
#[derive(Debug, Default)]
pub struct NotificationTray {
    items: Vec<Notification>,
}

impl NotificationTray {
    pub fn push(&mut self, n: Notification) {
        self.items.push(n);
    }

    /// Drop expired notifications and return what is still visible.
    pub fn visible(&mut self, now: Instant) -> &[Notification] {
        self.items.retain(|n| !n.is_expired(now));
        &self.items
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.last()
    }
}
