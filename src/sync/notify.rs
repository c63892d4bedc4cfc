//! Observer notifications

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;

use super::types::{Notification, NotificationKind};

/// Receiver of sync notifications; decides how and whether to show them
pub trait NotificationSink: Send + Sync {
    fn notify(&self, kind: NotificationKind, message: &str);
}

/// Sink that logs each notification and keeps the most recent ones
#[derive(Clone)]
pub struct NotificationLog {
    recent: Arc<Mutex<VecDeque<Notification>>>,
    capacity: usize,
}

impl NotificationLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            recent: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    /// Recent notifications, oldest first
    pub fn recent(&self) -> Vec<Notification> {
        self.recent.lock().iter().cloned().collect()
    }
}

impl Default for NotificationLog {
    fn default() -> Self {
        Self::new(50)
    }
}

impl NotificationSink for NotificationLog {
    fn notify(&self, kind: NotificationKind, message: &str) {
        tracing::info!(kind = ?kind, "{}", message);

        let mut recent = self.recent.lock();
        if recent.len() == self.capacity {
            recent.pop_front();
        }
        recent.push_back(Notification {
            kind,
            message: message.to_string(),
            timestamp: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_most_recent() {
        let log = NotificationLog::new(2);

        log.notify(NotificationKind::Synced, "one");
        log.notify(NotificationKind::ConflictResolved, "two");
        log.notify(NotificationKind::Synced, "three");

        let messages: Vec<String> = log.recent().into_iter().map(|n| n.message).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }
}
