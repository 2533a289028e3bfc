//! Command parser, pure reducer, and session layers for Gridbot.
//!
//! The core of this crate is two pure functions: [`parse`] turns a raw
//! line into a [`Command`](gridbot_core::Command), and [`apply`] folds a
//! command into a [`SimulationState`](gridbot_core::SimulationState),
//! returning the new state and an [`Outcome`](gridbot_core::Outcome).
//!
//! Everything time- or resource-dependent is layered on top:
//!
//! - [`Session`] owns the state plus a bounded [`CommandLog`], a
//!   [`NotificationTray`] with deadlines, and [`SessionMetrics`].
//! - [`SessionDriver`] runs a session on its own thread, expiring
//!   notifications as their deadlines pass.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod driver;
pub mod log;
pub mod metrics;
pub mod notify;
pub mod parser;
pub mod reducer;
pub mod session;

pub use config::{CasePolicy, ConfigError, DriverConfig, SessionConfig};
pub use driver::{DriverRequest, SessionDriver, SessionEvent, SubmitError};
pub use log::{CommandLog, LogEntry};
pub use metrics::SessionMetrics;
pub use notify::{ActiveNotification, NotificationId, NotificationTray, Pushed};
pub use parser::parse;
pub use reducer::{apply, Transition};
pub use session::Session;
