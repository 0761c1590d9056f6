//! Transient notifications ("toasts"). Shown for a while, never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Default,
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Variant,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Variant::Default,
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Variant::Success,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Variant::Destructive,
        }
    }
}

/// A notification stamped when it was raised.
#[derive(Debug, Clone, PartialEq)]
pub struct Shown {
    pub notification: Notification,
    pub raised_at: DateTime<Utc>,
    /// Clock time at which it stops being shown.
    pub expires_at: Duration,
}

/// Bounded queue of visible notifications.
#[derive(Debug, Clone)]
pub struct Notifications {
    ttl: Duration,
    capacity: usize,
    items: VecDeque<Shown>,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(Duration::from_secs(5), 3)
    }
}

impl Notifications {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity: capacity.max(1),
            items: VecDeque::new(),
        }
    }

    pub fn push(&mut self, notification: Notification, now: Duration) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(Shown {
            notification,
            raised_at: Utc::now(),
            expires_at: now + self.ttl,
        });
    }

    pub fn extend(&mut self, notifications: impl IntoIterator<Item = Notification>, now: Duration) {
        for n in notifications {
            self.push(n, now);
        }
    }

    /// Drop everything whose display time is over.
    pub fn expire(&mut self, now: Duration) {
        self.items.retain(|s| s.expires_at > now);
    }

    pub fn latest(&self) -> Option<&Shown> {
        self.items.back()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Shown> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_ttl() {
        let mut q = Notifications::new(Duration::from_secs(5), 3);
        q.push(Notification::info("a", ""), Duration::ZERO);
        q.push(Notification::info("b", ""), Duration::from_secs(3));

        q.expire(Duration::from_secs(5));
        assert_eq!(q.len(), 1);
        assert_eq!(q.latest().map(|s| s.notification.title.as_str()), Some("b"));

        q.expire(Duration::from_secs(8));
        assert!(q.is_empty());
    }

    #[test]
    fn drops_oldest_at_capacity() {
        let mut q = Notifications::new(Duration::from_secs(5), 2);
        q.extend(
            ["1", "2", "3"].map(|t| Notification::destructive(t, "")),
            Duration::ZERO,
        );
        let titles: Vec<&str> = q.iter().map(|s| s.notification.title.as_str()).collect();
        assert_eq!(titles, vec!["2", "3"]);
    }
}
