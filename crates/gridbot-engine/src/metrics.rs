//! Cumulative counters for a session.
//!
//! [`SessionMetrics`] is updated by [`Session`](crate::Session) on every
//! applied command, reset, dismissal and expiry. Counters only grow; a
//! reset is counted, not cleared.

use gridbot_core::StatusKind;

/// Cumulative session counters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionMetrics {
    /// Non-empty commands applied.
    pub commands_applied: u64,
    /// Commands that finished `OK`.
    pub ok: u64,
    /// Commands that finished `BLOCKED`.
    pub blocked: u64,
    /// Commands that finished `INVALID`.
    pub invalid: u64,
    /// Commands that finished `NOT_PLACED`.
    pub not_placed: u64,
    /// Notifications pushed to the tray.
    pub notifications_emitted: u64,
    /// Notifications evicted by capacity.
    pub notifications_evicted: u64,
    /// Notifications removed by their deadline.
    pub notifications_expired: u64,
    /// Notifications removed by the user.
    pub notifications_dismissed: u64,
    /// Log entries pushed out of the trailing window.
    pub log_entries_evicted: u64,
    /// Session resets.
    pub resets: u64,
}

impl SessionMetrics {
    /// Count one applied command with `status`.
    pub fn record_status(&mut self, status: StatusKind) {
        self.commands_applied += 1;
        match status {
            StatusKind::Ok => self.ok += 1,
            StatusKind::Blocked => self.blocked += 1,
            StatusKind::Invalid => self.invalid += 1,
            StatusKind::NotPlaced => self.not_placed += 1,
        }
    }

    /// Count for a given status.
    pub fn status_count(&self, status: StatusKind) -> u64 {
        match status {
            StatusKind::Ok => self.ok,
            StatusKind::Blocked => self.blocked,
            StatusKind::Invalid => self.invalid,
            StatusKind::NotPlaced => self.not_placed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = SessionMetrics::default();
        assert_eq!(m.commands_applied, 0);
        for status in StatusKind::ALL {
            assert_eq!(m.status_count(status), 0);
        }
        assert_eq!(m.notifications_emitted, 0);
        assert_eq!(m.resets, 0);
    }

    #[test]
    fn record_status_counts_each_kind() {
        let mut m = SessionMetrics::default();
        m.record_status(StatusKind::Ok);
        m.record_status(StatusKind::Ok);
        m.record_status(StatusKind::Invalid);
        m.record_status(StatusKind::NotPlaced);
        assert_eq!(m.commands_applied, 4);
        assert_eq!(m.status_count(StatusKind::Ok), 2);
        assert_eq!(m.status_count(StatusKind::Blocked), 0);
        assert_eq!(m.status_count(StatusKind::Invalid), 1);
        assert_eq!(m.status_count(StatusKind::NotPlaced), 1);
    }
}
