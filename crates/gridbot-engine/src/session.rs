//! Single-threaded session: the reducer plus everything the caller owns.
//!
//! [`Session`] threads state through [`apply`](crate::apply) one command at
//! a time and keeps the caller-side views the reducer leaves out: a
//! bounded [`CommandLog`], a [`NotificationTray`] with deadlines, and
//! [`SessionMetrics`]. All time-dependent calls take `now` explicitly, so
//! tests drive the clock directly.

use std::time::{Duration, Instant};

use gridbot_core::{Notification, Outcome, Severity, SimulationState, StatusKind};
use tracing::{debug, info};

use crate::config::{ConfigError, SessionConfig};
use crate::log::CommandLog;
use crate::metrics::SessionMetrics;
use crate::notify::{NotificationId, NotificationTray};
use crate::parser::parse;
use crate::reducer::apply;

/// A running simulation session.
///
/// # Examples
///
/// ```
/// use std::time::Instant;
/// use gridbot_core::StatusKind;
/// use gridbot_engine::{Session, SessionConfig};
///
/// let mut session = Session::new(SessionConfig::default()).unwrap();
/// let now = Instant::now();
/// session.submit("place_robot 1,1,north", now);
/// let out = session.submit("report", now).unwrap();
/// assert_eq!(out.status, StatusKind::Ok);
/// assert_eq!(session.state().last_report(), Some("1,1,NORTH"));
/// ```
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    state: SimulationState,
    log: CommandLog,
    tray: NotificationTray,
    metrics: SessionMetrics,
}

impl Session {
    /// Create a session after validating `config`.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = SimulationState::new(config.grid_size)?;
        let log = CommandLog::new(config.log_capacity);
        let tray = NotificationTray::new(
            config.notification_capacity,
            Duration::from_millis(config.default_notification_ms),
        );
        Ok(Self {
            config,
            state,
            log,
            tray,
            metrics: SessionMetrics::default(),
        })
    }

    /// Apply one line of raw input.
    ///
    /// Returns `None` for blank input, which touches nothing: no log
    /// lines, no metrics, no state change.
    pub fn submit(&mut self, raw: &str, now: Instant) -> Option<Outcome> {
        let normalized = self.config.case_policy.normalize(raw);
        let command = parse(&normalized);
        let (state, outcome) = apply(&self.state, &command).into_parts();
        let outcome = outcome?;
        self.state = state;

        let evicted = self.log.append(outcome.log_lines.iter().cloned());
        self.metrics.log_entries_evicted += evicted as u64;
        self.metrics.record_status(outcome.status);
        if let Some(notification) = &outcome.notification {
            self.push_notification(notification.clone(), now);
        }

        debug!(
            verb = %command.verb,
            status = %outcome.status,
            robot = ?self.state.robot(),
            walls = self.state.wall_count(),
            "command applied"
        );
        Some(outcome)
    }

    /// Replace the state with a fresh one of the same grid size and
    /// clear the log and notifications.
    ///
    /// Log and notification ids keep counting. A `SYSTEM_RESET` notice is
    /// pushed afterwards; its id is returned.
    pub fn reset(&mut self, now: Instant) -> NotificationId {
        self.state = self.state.cleared();
        self.log.clear();
        self.tray.clear();
        self.metrics.resets += 1;

        let notice = Notification::new(Severity::Info, "SYSTEM_RESET", "State cleared.")
            .lasting_ms(self.config.reset_notification_ms);
        let id = self.push_notification(notice, now);
        info!(resets = self.metrics.resets, "session reset");
        id
    }

    /// Dismiss an active notification. Returns whether it was active.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let removed = self.tray.dismiss(id);
        if removed {
            self.metrics.notifications_dismissed += 1;
        }
        removed
    }

    /// Remove notifications whose deadline has passed.
    pub fn expire(&mut self, now: Instant) -> Vec<NotificationId> {
        let expired = self.tray.expire_due(now);
        self.metrics.notifications_expired += expired.len() as u64;
        expired
    }

    /// The earliest pending notification deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tray.next_deadline()
    }

    fn push_notification(&mut self, notification: Notification, now: Instant) -> NotificationId {
        let pushed = self.tray.push(notification, now);
        self.metrics.notifications_emitted += 1;
        if !pushed.evicted.is_empty() {
            self.metrics.notifications_evicted += pushed.evicted.len() as u64;
            debug!(evicted = pushed.evicted.len(), "notification tray full");
        }
        pushed.id
    }

    // ── Accessors ───────────────────────────────────────────────

    /// Current simulation state.
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// The trailing command log.
    pub fn log(&self) -> &CommandLog {
        &self.log
    }

    /// Active notifications.
    pub fn notifications(&self) -> &NotificationTray {
        &self.tray
    }

    /// Cumulative counters.
    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }

    /// The session's configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Status of the most recent non-empty command.
    pub fn last_status(&self) -> Option<StatusKind> {
        self.state.last_status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CasePolicy;
    use gridbot_core::LogKind;

    fn session() -> Session {
        Session::new(SessionConfig::default()).unwrap()
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = SessionConfig {
            log_capacity: 0,
            ..SessionConfig::default()
        };
        match Session::new(cfg) {
            Err(ConfigError::LogCapacityZero) => {}
            other => panic!("expected LogCapacityZero, got {other:?}"),
        }
    }

    #[test]
    fn blank_submit_touches_nothing() {
        let mut s = session();
        assert!(s.submit("   ", Instant::now()).is_none());
        assert!(s.log().is_empty());
        assert_eq!(s.metrics(), &SessionMetrics::default());
        assert!(s.state().last_command().is_none());
    }

    #[test]
    fn submit_appends_two_log_lines() {
        let mut s = session();
        s.submit("MOVE", Instant::now());
        let entries: Vec<_> = s.log().entries().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, LogKind::Command);
        assert_eq!(entries[0].text, "> MOVE");
        assert_eq!(entries[1].kind, LogKind::Error);
        assert_eq!(s.metrics().not_placed, 1);
    }

    #[test]
    fn default_policy_uppercases() {
        let mut s = session();
        let out = s.submit("place_robot 2,2,east", Instant::now()).unwrap();
        assert_eq!(out.status, StatusKind::Ok);
        let first = s.log().entries().next().map(|e| e.text.clone());
        assert_eq!(first.as_deref(), Some("> PLACE_ROBOT 2,2,EAST"));
    }

    #[test]
    fn exact_policy_keeps_case() {
        let cfg = SessionConfig {
            case_policy: CasePolicy::Exact,
            ..SessionConfig::default()
        };
        let mut s = Session::new(cfg).unwrap();
        let out = s.submit("move", Instant::now()).unwrap();
        assert_eq!(out.status, StatusKind::Invalid);
        assert_eq!(out.message, "ERROR: UNKNOWN_CMD move");
    }

    #[test]
    fn notifications_get_deadlines() {
        let mut s = session();
        let now = Instant::now();
        s.submit("PLACE_WALL 1,1", now);
        assert_eq!(s.next_deadline(), Some(now + Duration::from_millis(2800)));
        s.submit("MOVE", now);
        assert_eq!(s.notifications().len(), 2);
        assert_eq!(s.expire(now + Duration::from_millis(2800)).len(), 1);
        assert_eq!(s.metrics().notifications_expired, 1);
    }

    #[test]
    fn log_window_is_bounded() {
        let cfg = SessionConfig {
            log_capacity: 4,
            ..SessionConfig::default()
        };
        let mut s = Session::new(cfg).unwrap();
        let now = Instant::now();
        for _ in 0..3 {
            s.submit("REPORT", now);
        }
        assert_eq!(s.log().len(), 4);
        assert_eq!(s.metrics().log_entries_evicted, 2);
        assert_eq!(s.log().last().map(|e| e.id), Some(6));
    }

    #[test]
    fn tray_evicts_beyond_capacity() {
        let mut s = session();
        let now = Instant::now();
        for _ in 0..6 {
            s.submit("FOO", now);
        }
        assert_eq!(s.notifications().len(), 4);
        assert_eq!(s.metrics().notifications_emitted, 6);
        assert_eq!(s.metrics().notifications_evicted, 2);
    }

    #[test]
    fn reset_clears_state_and_pushes_notice() {
        let mut s = session();
        let now = Instant::now();
        s.submit("PLACE_WALL 3,3", now);
        s.submit("PLACE_ROBOT 1,1,NORTH", now);
        let last_log_id = s.log().last().map(|e| e.id).unwrap();

        let id = s.reset(now);
        assert!(s.state().robot().is_none());
        assert_eq!(s.state().wall_count(), 0);
        assert!(s.state().last_command().is_none());
        assert!(s.log().is_empty());

        let active: Vec<_> = s.notifications().active().collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, id);
        assert_eq!(active[0].notification.title, "SYSTEM_RESET");
        assert_eq!(active[0].notification.message, "State cleared.");
        assert_eq!(active[0].expires_at, now + Duration::from_millis(2600));
        assert_eq!(id, NotificationId(3));

        s.submit("MOVE", now);
        assert_eq!(s.log().entries().next().map(|e| e.id), Some(last_log_id + 1));
        assert_eq!(s.metrics().resets, 1);
    }

    #[test]
    fn reset_keeps_grid_size() {
        let cfg = SessionConfig {
            grid_size: 8,
            ..SessionConfig::default()
        };
        let mut s = Session::new(cfg).unwrap();
        s.reset(Instant::now());
        assert_eq!(s.state().grid_size(), 8);
    }

    #[test]
    fn dismiss_counts_once() {
        let mut s = session();
        let now = Instant::now();
        s.submit("REPORT", now);
        let id = s.notifications().active().next().map(|n| n.id).unwrap();
        assert!(s.dismiss(id));
        assert!(!s.dismiss(id));
        assert_eq!(s.metrics().notifications_dismissed, 1);
    }
}
