//! Gridbot: a command-driven robot on a wrap-around grid with walls.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Gridbot sub-crates. For most users, adding `gridbot` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use gridbot::prelude::*;
//!
//! // The pure reducer: one command in, one new state and outcome out.
//! let state = SimulationState::default();
//! let (state, outcome) = apply(&state, &parse("PLACE_ROBOT 1,1,NORTH")).into_parts();
//! assert_eq!(outcome.unwrap().status, StatusKind::Ok);
//!
//! let (state, outcome) = apply(&state, &parse("MOVE")).into_parts();
//! assert_eq!(outcome.unwrap().message, "OK: MOVED 2,1");
//! assert_eq!(state.robot().unwrap().to_string(), "2,1,NORTH");
//!
//! // A session adds case folding, the command log, and notifications.
//! let mut session = Session::new(SessionConfig::default()).unwrap();
//! let now = std::time::Instant::now();
//! session.submit("place_wall 3,1", now);
//! session.submit("place_robot 2,1,north", now);
//! let blocked = session.submit("move", now).unwrap();
//! assert_eq!(blocked.status, StatusKind::Blocked);
//! assert_eq!(session.log().len(), 6);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `gridbot-core` | Grid geometry, facings, commands, state, outcomes |
//! | [`engine`] | `gridbot-engine` | Parser, reducer, sessions, and the session driver |
//! | [`replay`] | `gridbot-replay` | Deterministic replay recording and verification |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`gridbot-core`).
///
/// Contains [`types::Position`], [`types::Facing`], [`types::Command`],
/// [`types::SimulationState`], and [`types::Outcome`].
pub use gridbot_core as types;

/// Parser, reducer, and sessions (`gridbot-engine`).
///
/// [`engine::apply`] is the pure reducer. [`engine::Session`] wraps it with
/// a log and notification tray, and [`engine::SessionDriver`] runs a
/// session on its own thread.
pub use gridbot_engine as engine;

/// Deterministic replay recording and verification (`gridbot-replay`).
///
/// Record sessions with [`replay::ReplayWriter`], check them with
/// [`replay::verify_session`].
pub use gridbot_replay as replay;

/// Common imports for typical Gridbot usage.
///
/// ```rust
/// use gridbot::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use gridbot_core::{
        Command, Facing, Notification, Outcome, Position, Robot, Severity, SimulationState,
        StatusKind, Verb,
    };

    // Engine
    pub use gridbot_engine::{
        apply, parse, CasePolicy, Session, SessionConfig, SessionDriver, SessionEvent,
        Transition,
    };
}
