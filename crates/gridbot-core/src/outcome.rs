//! Outcome descriptor: status, message, notification request, and log lines.

use std::fmt;
use std::time::Duration;

/// Result classification of one applied command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// The command succeeded and its effect was applied.
    Ok,
    /// A legal move was stopped by a wall.
    Blocked,
    /// Malformed or semantically illegal command.
    Invalid,
    /// The command needs a robot and none has been placed.
    NotPlaced,
}

impl StatusKind {
    /// Every status, in declaration order.
    pub const ALL: [StatusKind; 4] = [
        StatusKind::Ok,
        StatusKind::Blocked,
        StatusKind::Invalid,
        StatusKind::NotPlaced,
    ];

    /// Canonical uppercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusKind::Ok => "OK",
            StatusKind::Blocked => "BLOCKED",
            StatusKind::Invalid => "INVALID",
            StatusKind::NotPlaced => "NOT_PLACED",
        }
    }

    /// Whether this is [`StatusKind::Ok`].
    pub fn is_ok(self) -> bool {
        self == StatusKind::Ok
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual severity of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Neutral information (e.g. a report).
    Info,
    /// A placement succeeded.
    Success,
    /// The command could not run yet.
    Warning,
    /// The command failed.
    Error,
}

impl Severity {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request for a short-lived, user-facing message.
///
/// The engine only emits the request. Scheduling its removal is the
/// caller's job; `duration` is a display hint, `None` meaning the
/// caller's default lifetime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Visual severity.
    pub severity: Severity,
    /// Short uppercase title, e.g. `MOVE_BLOCKED`.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Requested display lifetime.
    pub duration: Option<Duration>,
}

impl Notification {
    /// Create a notification that uses the caller's default lifetime.
    pub fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: message.into(),
            duration: None,
        }
    }

    /// Request a specific display lifetime in milliseconds.
    pub fn lasting_ms(mut self, ms: u64) -> Self {
        self.duration = Some(Duration::from_millis(ms));
        self
    }
}

/// Tag on a log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogKind {
    /// The echoed command text.
    Command,
    /// Message of a successful command.
    Output,
    /// Message of a failed command.
    Error,
}

impl LogKind {
    /// Lowercase name, used to tag rendered log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            LogKind::Command => "command",
            LogKind::Output => "output",
            LogKind::Error => "error",
        }
    }
}

/// One line destined for the caller's running log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogLine {
    /// Line tag.
    pub kind: LogKind,
    /// Line text.
    pub text: String,
}

/// Everything one command application produces besides the new state.
///
/// A pure function of the prior state and the parsed command.
///
/// # Examples
///
/// ```
/// use gridbot_core::{LogKind, Outcome, StatusKind};
///
/// let out = Outcome::new("MOVE", StatusKind::NotPlaced, "ERROR: ROBOT_NOT_PLACED".into(), None);
/// assert_eq!(out.log_lines[0].text, "> MOVE");
/// assert_eq!(out.log_lines[1].kind, LogKind::Error);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// Result classification.
    pub status: StatusKind,
    /// Human-readable result message.
    pub message: String,
    /// Optional notification request.
    pub notification: Option<Notification>,
    /// The echoed command followed by the message.
    pub log_lines: [LogLine; 2],
}

impl Outcome {
    /// Build an outcome, deriving both log lines from `raw` and `message`.
    pub fn new(
        raw: &str,
        status: StatusKind,
        message: String,
        notification: Option<Notification>,
    ) -> Self {
        let kind = if status.is_ok() {
            LogKind::Output
        } else {
            LogKind::Error
        };
        let log_lines = [
            LogLine {
                kind: LogKind::Command,
                text: format!("> {raw}"),
            },
            LogLine {
                kind,
                text: message.clone(),
            },
        ];
        Self {
            status,
            message,
            notification,
            log_lines,
        }
    }
}
