//! Notification center.
//!
//! Ordered queue of transient messages with process-local lifetime.
//! Entries are displayed in insertion order and dismissed individually.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use uuid::Uuid;

use crate::config::ClientConfig;

use super::sink::{NotificationSink, Severity};

/// A single transient message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(usize) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

/// Thread-safe notification queue.
///
/// Listeners registered with [`NotificationCenter::subscribe`] receive the
/// new entry count after every change. They are called after the queue lock
/// is released, so a listener may read the center.
#[derive(Default)]
pub struct NotificationCenter {
    items: Mutex<Vec<Notification>>,
    listeners: Mutex<Listeners>,
    ttl: Option<Duration>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries older than `ttl` are dropped by [`prune_expired`](Self::prune_expired).
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl: Some(ttl),
            ..Self::default()
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        match config.notification_ttl() {
            Some(ttl) => Self::with_ttl(ttl),
            None => Self::new(),
        }
    }

    /// Append a notification and return its generated id.
    pub fn add_notification(&self, message: &str, severity: Severity) -> String {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            message: message.to_string(),
            severity,
            created_at: Utc::now(),
        };
        let id = notification.id.clone();

        let count = {
            let mut items = self.items.lock();
            items.push(notification);
            items.len()
        };

        log::debug!(
            "NOTIFICATION_ADDED id={} severity={} count={}",
            id,
            severity.as_str(),
            count
        );
        self.emit(count);
        id
    }

    /// Remove the entry with `id`. Returns false when no such entry exists.
    pub fn remove_notification(&self, id: &str) -> bool {
        let removed = {
            let mut items = self.items.lock();
            items
                .iter()
                .position(|n| n.id == id)
                .map(|pos| {
                    items.remove(pos);
                    items.len()
                })
        };

        match removed {
            Some(count) => {
                log::debug!("NOTIFICATION_REMOVED id={} count={}", id, count);
                self.emit(count);
                true
            }
            None => false,
        }
    }

    /// Snapshot in insertion order.
    pub fn notifications(&self) -> Vec<Notification> {
        self.items.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Count shown on the bell badge; `None` hides the badge.
    pub fn badge_count(&self) -> Option<usize> {
        match self.count() {
            0 => None,
            n => Some(n),
        }
    }

    /// Drop entries older than the configured TTL. Returns how many were dropped.
    pub fn prune_expired(&self, now: DateTime<Utc>) -> usize {
        let ttl = match self.ttl {
            Some(ttl) => ttl,
            None => return 0,
        };

        let (dropped, count) = {
            let mut items = self.items.lock();
            let before = items.len();
            items.retain(|n| now.signed_duration_since(n.created_at) < ttl);
            (before - items.len(), items.len())
        };

        if dropped > 0 {
            log::debug!("NOTIFICATION_EXPIRED dropped={} count={}", dropped, count);
            self.emit(count);
        }
        dropped
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        let mut listeners = self.listeners.lock();
        listeners.next_id += 1;
        let id = SubscriptionId(listeners.next_id);
        listeners.entries.push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.lock().entries.retain(|(sid, _)| *sid != id);
    }

    fn emit(&self, count: usize) {
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .entries
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();

        for listener in listeners {
            listener(count);
        }
    }
}

impl NotificationSink for NotificationCenter {
    fn notify(&self, message: &str, severity: Severity) {
        self.add_notification(message, severity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_add_and_remove_restores_list() {
        let center = NotificationCenter::new();
        center.add_notification("first", Severity::Info);
        let before = center.notifications();

        let id = center.add_notification("second", Severity::Error);
        assert_eq!(center.count(), 2);

        assert!(center.remove_notification(&id));
        assert_eq!(center.notifications(), before);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let center = NotificationCenter::new();
        center.add_notification("only", Severity::Info);
        assert!(!center.remove_notification("missing"));
        assert_eq!(center.count(), 1);
    }

    #[test]
    fn test_insertion_order_and_unique_ids() {
        let center = NotificationCenter::new();
        let a = center.add_notification("a", Severity::Info);
        let b = center.add_notification("b", Severity::Warning);
        let c = center.add_notification("c", Severity::Success);
        assert_ne!(a, b);
        assert_ne!(b, c);

        let messages: Vec<String> = center.notifications().into_iter().map(|n| n.message).collect();
        assert_eq!(messages, vec!["a", "b", "c"]);

        center.remove_notification(&b);
        let messages: Vec<String> = center.notifications().into_iter().map(|n| n.message).collect();
        assert_eq!(messages, vec!["a", "c"]);
    }

    #[test]
    fn test_badge_count() {
        let center = NotificationCenter::new();
        assert_eq!(center.badge_count(), None);
        center.add_notification("x", Severity::Info);
        assert_eq!(center.badge_count(), Some(1));
    }

    #[test]
    fn test_prune_without_ttl_keeps_everything() {
        let center = NotificationCenter::new();
        center.add_notification("x", Severity::Info);
        assert_eq!(center.prune_expired(Utc::now() + Duration::days(1)), 0);
        assert_eq!(center.count(), 1);
    }

    #[test]
    fn test_prune_with_ttl() {
        let center = NotificationCenter::with_ttl(Duration::seconds(5));
        center.add_notification("old", Severity::Info);
        let now = Utc::now();

        assert_eq!(center.prune_expired(now), 0);
        assert_eq!(center.prune_expired(now + Duration::seconds(6)), 1);
        assert!(center.is_empty());
    }

    #[test]
    fn test_subscribers_see_counts() {
        let center = NotificationCenter::new();
        let last = Arc::new(AtomicUsize::new(usize::MAX));
        let seen = Arc::clone(&last);
        let sub = center.subscribe(move |count| seen.store(count, Ordering::SeqCst));

        let id = center.add_notification("x", Severity::Info);
        assert_eq!(last.load(Ordering::SeqCst), 1);
        center.remove_notification(&id);
        assert_eq!(last.load(Ordering::SeqCst), 0);

        center.unsubscribe(sub);
        center.add_notification("y", Severity::Info);
        assert_eq!(last.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_sink_impl_appends() {
        let center = NotificationCenter::new();
        let sink: &dyn NotificationSink = &center;
        sink.notify("Incident location saved successfully", Severity::Success);
        assert_eq!(center.notifications()[0].severity, Severity::Success);
    }
}
