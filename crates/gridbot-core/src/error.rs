//! Error types for grid construction and state transitions.
//!
//! None of these ever cross the engine boundary: the reducer maps each
//! of them to an in-band [`StatusKind`](crate::StatusKind) and message.

use std::error::Error;
use std::fmt;

use crate::grid::Position;

/// Errors from constructing a grid of a given side length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// Attempted to construct a grid with zero cells.
    EmptyGrid,
    /// The side length exceeds the supported maximum.
    DimensionTooLarge {
        /// The requested side length.
        value: u32,
        /// The maximum accepted side length.
        max: u32,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid must have at least one cell"),
            Self::DimensionTooLarge { value, max } => {
                write!(f, "grid size {value} exceeds maximum of {max}")
            }
        }
    }
}

impl Error for GridError {}

/// Errors from placing the robot or a wall.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlacementError {
    /// The requested cell lies outside `[1, grid_size]` on either axis.
    OutOfBounds {
        /// Requested row.
        row: i64,
        /// Requested column.
        col: i64,
        /// Side length of the grid.
        grid_size: u32,
    },
    /// The robot would be placed on a wall cell.
    RobotOnWall(Position),
    /// A wall would be placed on the robot's cell.
    WallOnRobot(Position),
    /// The cell already holds a wall.
    WallExists(Position),
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                row,
                col,
                grid_size,
            } => write!(
                f,
                "cell {row},{col} out of bounds: [1, {grid_size}] x [1, {grid_size}]"
            ),
            Self::RobotOnWall(pos) => write!(f, "robot on wall at {pos}"),
            Self::WallOnRobot(pos) => write!(f, "wall on robot at {pos}"),
            Self::WallExists(pos) => write!(f, "wall already exists at {pos}"),
        }
    }
}

impl Error for PlacementError {}

/// Errors from commands that act on the robot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionError {
    /// No robot has been placed yet.
    NotPlaced,
    /// The cell ahead holds a wall.
    Blocked(Position),
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPlaced => write!(f, "robot not placed"),
            Self::Blocked(pos) => write!(f, "move blocked by wall at {pos}"),
        }
    }
}

impl Error for MotionError {}

/// A facing token was not one of the canonical direction names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseFacingError {
    /// The rejected token.
    pub token: String,
}

impl fmt::Display for ParseFacingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unrecognized facing '{}' (expected NORTH, EAST, SOUTH or WEST)",
            self.token
        )
    }
}

impl Error for ParseFacingError {}
