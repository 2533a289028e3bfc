//! Active notification tray with deadline-based expiry.
//!
//! The reducer only requests notifications. The tray owns their
//! lifetimes: each pushed notification gets an id and a deadline, and
//! the caller drives expiry by calling [`NotificationTray::expire_due`]
//! with the current time. Manual dismissal removes the entry, which also
//! cancels its pending expiry.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use gridbot_core::Notification;

/// Identifier of a notification within one session.
///
/// Ids are monotonic and never reused, including across resets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A notification currently on display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveNotification {
    /// Tray-assigned id.
    pub id: NotificationId,
    /// The requested notification.
    pub notification: Notification,
    /// When it should be removed.
    pub expires_at: Instant,
}

/// Result of [`NotificationTray::push`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pushed {
    /// Id assigned to the new notification.
    pub id: NotificationId,
    /// Ids evicted to stay within capacity, oldest first.
    pub evicted: Vec<NotificationId>,
}

/// Bounded collection of active notifications.
#[derive(Clone, Debug)]
pub struct NotificationTray {
    active: VecDeque<ActiveNotification>,
    capacity: usize,
    default_lifetime: Duration,
    next_id: u64,
}

impl NotificationTray {
    /// Create an empty tray. `capacity` is raised to at least 1.
    pub fn new(capacity: usize, default_lifetime: Duration) -> Self {
        let capacity = capacity.max(1);
        Self {
            active: VecDeque::with_capacity(capacity),
            capacity,
            default_lifetime,
            next_id: 1,
        }
    }

    /// Add a notification that expires at `now` plus its requested
    /// duration, or the tray default if it requests none.
    pub fn push(&mut self, notification: Notification, now: Instant) -> Pushed {
        let id = NotificationId(self.next_id);
        self.next_id += 1;

        let lifetime = notification.duration.unwrap_or(self.default_lifetime);
        let mut evicted = Vec::new();
        while self.active.len() >= self.capacity {
            if let Some(old) = self.active.pop_front() {
                evicted.push(old.id);
            }
        }
        self.active.push_back(ActiveNotification {
            id,
            notification,
            expires_at: now + lifetime,
        });
        Pushed { id, evicted }
    }

    /// Remove the notification with `id`. Returns whether it was active.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        match self.active.iter().position(|n| n.id == id) {
            Some(idx) => {
                self.active.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove every notification whose deadline is at or before `now`.
    ///
    /// Returns the removed ids in display order.
    pub fn expire_due(&mut self, now: Instant) -> Vec<NotificationId> {
        let mut expired = Vec::new();
        self.active.retain(|n| {
            if n.expires_at <= now {
                expired.push(n.id);
                false
            } else {
                true
            }
        });
        expired
    }

    /// The earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.active.iter().map(|n| n.expires_at).min()
    }

    /// Active notifications, oldest first.
    pub fn active(&self) -> impl Iterator<Item = &ActiveNotification> + '_ {
        self.active.iter()
    }

    /// The most recently pushed active notification.
    pub fn newest(&self) -> Option<&ActiveNotification> {
        self.active.back()
    }

    /// Look up an active notification.
    pub fn get(&self, id: NotificationId) -> Option<&ActiveNotification> {
        self.active.iter().find(|n| n.id == id)
    }

    /// Number of active notifications.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether no notification is active.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Drop every active notification. The id counter is kept.
    pub fn clear(&mut self) {
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridbot_core::Severity;

    fn note(title: &str) -> Notification {
        Notification::new(Severity::Info, title, "body")
    }

    fn tray() -> NotificationTray {
        NotificationTray::new(4, Duration::from_millis(2800))
    }

    #[test]
    fn push_uses_default_or_requested_lifetime() {
        let now = Instant::now();
        let mut t = tray();
        let a = t.push(note("A"), now).id;
        let b = t.push(note("B").lasting_ms(1000), now).id;
        assert_eq!(
            t.get(a).map(|n| n.expires_at),
            Some(now + Duration::from_millis(2800))
        );
        assert_eq!(
            t.get(b).map(|n| n.expires_at),
            Some(now + Duration::from_millis(1000))
        );
        assert_eq!(t.next_deadline(), Some(now + Duration::from_millis(1000)));
    }

    #[test]
    fn evicts_oldest_beyond_capacity() {
        let now = Instant::now();
        let mut t = tray();
        let ids: Vec<_> = (0..4).map(|i| t.push(note(&i.to_string()), now).id).collect();
        let pushed = t.push(note("E"), now);
        assert_eq!(pushed.evicted, vec![ids[0]]);
        assert_eq!(t.len(), 4);
        assert_eq!(t.newest().map(|n| n.id), Some(pushed.id));
        assert!(t.get(ids[0]).is_none());
    }

    #[test]
    fn dismiss_removes_and_cancels_expiry() {
        let now = Instant::now();
        let mut t = tray();
        let id = t.push(note("A"), now).id;
        assert!(t.dismiss(id));
        assert!(!t.dismiss(id));
        assert!(t.next_deadline().is_none());
        assert!(t.expire_due(now + Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn expire_due_removes_only_elapsed() {
        let now = Instant::now();
        let mut t = tray();
        let short = t.push(note("S").lasting_ms(100), now).id;
        let long = t.push(note("L").lasting_ms(5000), now).id;
        assert!(t.expire_due(now).is_empty());
        assert_eq!(t.expire_due(now + Duration::from_millis(100)), vec![short]);
        assert!(t.get(long).is_some());
    }

    #[test]
    fn ids_survive_clear() {
        let now = Instant::now();
        let mut t = tray();
        t.push(note("A"), now);
        t.clear();
        assert!(t.is_empty());
        assert_eq!(t.push(note("B"), now).id, NotificationId(2));
    }
}
