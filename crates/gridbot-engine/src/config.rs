//! Session and driver configuration, validation, and error types.
//!
//! [`SessionConfig`] is the builder input for a [`Session`](crate::Session).
//! [`validate()`](SessionConfig::validate) checks structural invariants
//! once at construction; nothing downstream re-checks them.

use std::error::Error;
use std::fmt;

use gridbot_core::error::GridError;
use gridbot_core::grid::{self, GRID_SIZE};

// ── CasePolicy ─────────────────────────────────────────────────────

/// How a session treats letter case in raw input before parsing.
///
/// The parser and reducer are case-sensitive. A session applies this
/// policy first, so `place_robot 1,1,north` works under the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CasePolicy {
    /// Upper-case the whole line before parsing.
    #[default]
    Uppercase,
    /// Pass input through untouched.
    Exact,
}

impl CasePolicy {
    /// Apply the policy to one raw line.
    pub fn normalize(self, raw: &str) -> String {
        match self {
            CasePolicy::Uppercase => raw.to_uppercase(),
            CasePolicy::Exact => raw.to_string(),
        }
    }
}

// ── DriverConfig ───────────────────────────────────────────────────

/// Configuration for [`SessionDriver`](crate::SessionDriver).
#[derive(Clone, Debug)]
pub struct DriverConfig {
    /// Capacity of the bounded request channel. Default: 64.
    pub queue_capacity: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self { queue_capacity: 64 }
    }
}

impl DriverConfig {
    /// The request channel capacity, clamped to `[1, 4096]`.
    ///
    /// A zero-capacity channel would turn every submit into a rendezvous.
    pub fn resolved_queue_capacity(&self) -> usize {
        self.queue_capacity.clamp(1, 4096)
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SessionConfig::validate()`].
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The grid size is zero or too large.
    Grid(GridError),
    /// `log_capacity` is zero.
    LogCapacityZero,
    /// `notification_capacity` is zero.
    NotificationCapacityZero,
    /// A notification lifetime is zero.
    ZeroDuration {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The driver thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of the failure.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::LogCapacityZero => write!(f, "log_capacity must be at least 1"),
            Self::NotificationCapacityZero => {
                write!(f, "notification_capacity must be at least 1")
            }
            Self::ZeroDuration { field } => write!(f, "{field} must be at least 1 ms"),
            Self::ThreadSpawnFailed { reason } => write!(f, "thread spawn failed: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

// ── SessionConfig ──────────────────────────────────────────────────

/// Complete configuration for a [`Session`](crate::Session).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Side length of the square grid. Default: 5.
    pub grid_size: u32,
    /// Entries retained in the trailing command log. Default: 200.
    pub log_capacity: usize,
    /// Active notifications retained; the oldest is evicted first. Default: 4.
    pub notification_capacity: usize,
    /// Lifetime of notifications that request none. Default: 2800 ms.
    pub default_notification_ms: u64,
    /// Lifetime of the reset notice. Default: 2600 ms.
    pub reset_notification_ms: u64,
    /// Case handling applied before parsing. Default: upper-case.
    pub case_policy: CasePolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            log_capacity: 200,
            notification_capacity: 4,
            default_notification_ms: 2800,
            reset_notification_ms: 2600,
            case_policy: CasePolicy::Uppercase,
        }
    }
}

impl SessionConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        grid::validate_grid_size(self.grid_size)?;
        if self.log_capacity == 0 {
            return Err(ConfigError::LogCapacityZero);
        }
        if self.notification_capacity == 0 {
            return Err(ConfigError::NotificationCapacityZero);
        }
        if self.default_notification_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "default_notification_ms",
            });
        }
        if self.reset_notification_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "reset_notification_ms",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(SessionConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_grid_rejected() {
        let cfg = SessionConfig {
            grid_size: 0,
            ..SessionConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::Grid(GridError::EmptyGrid)) => {}
            other => panic!("expected Grid(EmptyGrid), got {other:?}"),
        }
    }

    #[test]
    fn oversized_grid_rejected() {
        let cfg = SessionConfig {
            grid_size: 5000,
            ..SessionConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::Grid(GridError::DimensionTooLarge { value: 5000, .. })) => {}
            other => panic!("expected DimensionTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn zero_capacities_rejected() {
        let cfg = SessionConfig {
            log_capacity: 0,
            ..SessionConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::LogCapacityZero));

        let cfg = SessionConfig {
            notification_capacity: 0,
            ..SessionConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::NotificationCapacityZero));
    }

    #[test]
    fn zero_durations_rejected() {
        let cfg = SessionConfig {
            reset_notification_ms: 0,
            ..SessionConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::ZeroDuration {
                field: "reset_notification_ms",
            }) => {}
            other => panic!("expected ZeroDuration, got {other:?}"),
        }
    }

    #[test]
    fn grid_error_is_source() {
        let err = ConfigError::from(GridError::EmptyGrid);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("grid:"));
        assert!(ConfigError::LogCapacityZero.source().is_none());
    }

    #[test]
    fn queue_capacity_clamped() {
        assert_eq!(DriverConfig::default().resolved_queue_capacity(), 64);
        let zero = DriverConfig { queue_capacity: 0 };
        assert_eq!(zero.resolved_queue_capacity(), 1);
        let huge = DriverConfig {
            queue_capacity: 1 << 20,
        };
        assert_eq!(huge.resolved_queue_capacity(), 4096);
    }

    #[test]
    fn case_policy_normalizes() {
        assert_eq!(
            CasePolicy::Uppercase.normalize("place_robot 1,1,north"),
            "PLACE_ROBOT 1,1,NORTH"
        );
        assert_eq!(CasePolicy::Exact.normalize("move"), "move");
        assert_eq!(CasePolicy::default(), CasePolicy::Uppercase);
    }
}
