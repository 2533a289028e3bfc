//! Core types and state transitions for the Gridbot simulation.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! value types every other crate threads through: grid positions, facings,
//! the robot, the immutable [`SimulationState`], parsed [`Command`]s, and
//! the [`Outcome`] bundle returned for every applied command.
//!
//! All state transitions are methods on [`SimulationState`] that return a
//! *new* state. The wall/robot disjointness and bounds invariants are
//! enforced here, so no other crate can construct a state that violates them.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod command;
pub mod error;
pub mod facing;
pub mod grid;
pub mod outcome;
pub mod state;

pub use command::{Args, Command, Verb};
pub use error::{GridError, MotionError, ParseFacingError, PlacementError};
pub use facing::{Facing, Turn};
pub use grid::{Position, GRID_SIZE, MAX_GRID_SIZE};
pub use outcome::{LogKind, LogLine, Notification, Outcome, Severity, StatusKind};
pub use state::{Robot, SimulationState};
