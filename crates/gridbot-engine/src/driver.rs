//! Threaded session driver.
//!
//! The driver thread owns the [`Session`] exclusively (moved in via
//! `thread::spawn`). Requests arrive over a bounded crossbeam channel and
//! results go back as [`SessionEvent`]s on an unbounded one, so callers
//! never interleave `apply` calls.
//!
//! ```text
//! Caller thread(s)                 Driver thread
//!     |                                |
//!     |--submit()/reset()/dismiss()--->| rx.recv_timeout(next deadline)
//!     |   [req_tx: bounded(64)]        | session.submit()/reset()/dismiss()
//!     |                                | session.expire(now)
//!     |<--SessionEvent-----------------|
//!     |   [event_tx: unbounded]        |
//! ```

use std::fmt;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};
use gridbot_core::{Outcome, SimulationState};
use tracing::{debug, info, warn};

use crate::config::{ConfigError, DriverConfig};
use crate::notify::NotificationId;
use crate::session::Session;

// ── Error types ──────────────────────────────────────────────────

/// Error submitting a request to the driver thread.
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitError {
    /// The driver thread has shut down.
    Shutdown,
    /// The request channel is full (back-pressure).
    ChannelFull,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shutdown => write!(f, "driver thread has shut down"),
            Self::ChannelFull => write!(f, "request channel full"),
        }
    }
}

impl std::error::Error for SubmitError {}

// ── Requests and events ──────────────────────────────────────────

/// A request for the driver thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DriverRequest {
    /// Apply one line of raw input.
    Command(String),
    /// Reset the session.
    Reset,
    /// Dismiss a notification.
    Dismiss(NotificationId),
}

/// Something that happened on the driver thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// A non-empty command was applied.
    Applied {
        /// The input line as submitted, before case normalization.
        raw: String,
        /// The reducer's outcome.
        outcome: Outcome,
        /// The state after the command.
        state: SimulationState,
        /// Id of the notification pushed for this outcome, if any.
        notification: Option<NotificationId>,
    },
    /// The session was reset.
    Reset {
        /// Id of the reset notice.
        notification: NotificationId,
    },
    /// A dismissal request was handled.
    Dismissed {
        /// The requested id.
        id: NotificationId,
        /// Whether it was still active.
        removed: bool,
    },
    /// Notifications reached their deadline.
    Expired {
        /// Removed ids, in display order.
        ids: Vec<NotificationId>,
    },
}

// ── SessionDriver ────────────────────────────────────────────────

/// Runs a [`Session`] on a dedicated thread.
///
/// Dropping the driver shuts it down; call [`shutdown()`](Self::shutdown)
/// directly to get the session back.
pub struct SessionDriver {
    req_tx: Option<Sender<DriverRequest>>,
    event_rx: Receiver<SessionEvent>,
    thread: Option<JoinHandle<Session>>,
}

impl SessionDriver {
    /// Move `session` onto a new driver thread.
    pub fn spawn(session: Session, config: DriverConfig) -> Result<Self, ConfigError> {
        let (req_tx, req_rx) = crossbeam_channel::bounded(config.resolved_queue_capacity());
        let (event_tx, event_rx) = crossbeam_channel::unbounded();

        let thread = thread::Builder::new()
            .name("gridbot-session".into())
            .spawn(move || run(session, req_rx, event_tx))
            .map_err(|e| ConfigError::ThreadSpawnFailed {
                reason: e.to_string(),
            })?;
        info!(
            queue_capacity = config.resolved_queue_capacity(),
            "session driver started"
        );

        Ok(Self {
            req_tx: Some(req_tx),
            event_rx,
            thread: Some(thread),
        })
    }

    /// Queue a request without blocking.
    pub fn send(&self, request: DriverRequest) -> Result<(), SubmitError> {
        let req_tx = self.req_tx.as_ref().ok_or(SubmitError::Shutdown)?;
        req_tx.try_send(request).map_err(|e| {
            let err = match e {
                TrySendError::Full(_) => SubmitError::ChannelFull,
                TrySendError::Disconnected(_) => SubmitError::Shutdown,
            };
            warn!(error = %err, "driver request rejected");
            err
        })
    }

    /// Queue one line of raw input.
    pub fn submit(&self, raw: impl Into<String>) -> Result<(), SubmitError> {
        self.send(DriverRequest::Command(raw.into()))
    }

    /// Queue a session reset.
    pub fn reset(&self) -> Result<(), SubmitError> {
        self.send(DriverRequest::Reset)
    }

    /// Queue a notification dismissal.
    pub fn dismiss(&self, id: NotificationId) -> Result<(), SubmitError> {
        self.send(DriverRequest::Dismiss(id))
    }

    /// The event stream.
    pub fn events(&self) -> &Receiver<SessionEvent> {
        &self.event_rx
    }

    /// Stop the thread after it drains queued requests, and return the
    /// session.
    ///
    /// Returns `None` if already shut down or if the thread panicked.
    pub fn shutdown(&mut self) -> Option<Session> {
        // Disconnecting the request channel ends the loop.
        self.req_tx.take();
        let handle = self.thread.take()?;
        match handle.join() {
            Ok(session) => {
                info!(
                    commands = session.metrics().commands_applied,
                    "session driver stopped"
                );
                Some(session)
            }
            Err(_) => {
                warn!("session driver thread panicked");
                None
            }
        }
    }
}

impl Drop for SessionDriver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Driver thread main loop. Returns the session once every sender is gone.
fn run(
    mut session: Session,
    req_rx: Receiver<DriverRequest>,
    event_tx: Sender<SessionEvent>,
) -> Session {
    loop {
        let request = match session.next_deadline() {
            Some(deadline) => {
                let wait = deadline.saturating_duration_since(Instant::now());
                match req_rx.recv_timeout(wait) {
                    Ok(request) => Some(request),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            None => match req_rx.recv() {
                Ok(request) => Some(request),
                Err(_) => break,
            },
        };

        let now = Instant::now();
        if let Some(request) = request {
            if let Some(event) = handle(&mut session, request, now) {
                // A dropped receiver just means nobody is listening.
                let _ = event_tx.send(event);
            }
        }

        let ids = session.expire(now);
        if !ids.is_empty() {
            debug!(count = ids.len(), "notifications expired");
            let _ = event_tx.send(SessionEvent::Expired { ids });
        }
    }
    session
}

fn handle(session: &mut Session, request: DriverRequest, now: Instant) -> Option<SessionEvent> {
    match request {
        DriverRequest::Command(raw) => {
            let outcome = session.submit(&raw, now)?;
            let notification = outcome
                .notification
                .as_ref()
                .and(session.notifications().newest().map(|n| n.id));
            Some(SessionEvent::Applied {
                raw,
                outcome,
                state: session.state().clone(),
                notification,
            })
        }
        DriverRequest::Reset => Some(SessionEvent::Reset {
            notification: session.reset(now),
        }),
        DriverRequest::Dismiss(id) => Some(SessionEvent::Dismissed {
            id,
            removed: session.dismiss(id),
        }),
    }
}
