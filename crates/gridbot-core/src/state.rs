//! The robot and the immutable simulation state.
//!
//! [`SimulationState`] is the only aggregate that changes over a session,
//! and it never changes in place: every transition borrows the current
//! state and returns a new one. Fields are private, so the invariants
//! below hold for every value a caller can observe:
//!
//! - the robot, if present, lies within `[1, N] x [1, N]`;
//! - the robot never shares a cell with a wall;
//! - walls are never removed or duplicated;
//! - `last_report` changes only through [`SimulationState::reporting`].

use std::fmt;

use indexmap::IndexSet;

use crate::error::{GridError, MotionError, PlacementError};
use crate::facing::{Facing, Turn};
use crate::grid::{self, Position, GRID_SIZE};
use crate::outcome::StatusKind;

/// The single robot: a position plus a facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Robot {
    /// Current cell.
    pub position: Position,
    /// Current facing.
    pub facing: Facing,
}

impl Robot {
    /// Create a robot.
    pub const fn new(position: Position, facing: Facing) -> Self {
        Self { position, facing }
    }
}

impl fmt::Display for Robot {
    /// Report format: `row,col,FACING`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.position, self.facing)
    }
}

/// Authoritative simulation state.
///
/// Cheap to clone at the grid sizes in scope; transitions clone and
/// replace rather than mutate.
///
/// # Examples
///
/// ```
/// use gridbot_core::{Facing, Position, Robot, SimulationState};
///
/// let s0 = SimulationState::default();
/// let s1 = s0.placing_wall(Position::new(1, 2)).unwrap();
/// let s2 = s1
///     .placing_robot(Robot::new(Position::new(1, 1), Facing::North))
///     .unwrap();
///
/// // The earlier states are untouched.
/// assert!(s0.robot().is_none());
/// assert_eq!(s1.wall_count(), 1);
/// assert_eq!(s2.robot().unwrap().position, Position::new(1, 1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationState {
    grid_size: u32,
    robot: Option<Robot>,
    walls: IndexSet<Position>,
    last_report: Option<String>,
    last_command: Option<String>,
    last_status: Option<StatusKind>,
    last_message: Option<String>,
}

impl SimulationState {
    /// An empty state on a grid of side `grid_size`.
    ///
    /// Returns `Err(GridError::EmptyGrid)` if `grid_size == 0`, or
    /// `Err(GridError::DimensionTooLarge)` above [`MAX_GRID_SIZE`](crate::MAX_GRID_SIZE).
    pub fn new(grid_size: u32) -> Result<Self, GridError> {
        Ok(Self {
            grid_size: grid::validate_grid_size(grid_size)?,
            robot: None,
            walls: IndexSet::new(),
            last_report: None,
            last_command: None,
            last_status: None,
            last_message: None,
        })
    }

    // ── Accessors ───────────────────────────────────────────────

    /// Side length of the grid.
    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// The robot, if placed.
    pub fn robot(&self) -> Option<Robot> {
        self.robot
    }

    /// Walls in insertion order.
    pub fn walls(&self) -> &IndexSet<Position> {
        &self.walls
    }

    /// Number of walls.
    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    /// Whether `pos` holds a wall.
    pub fn has_wall(&self, pos: Position) -> bool {
        self.walls.contains(&pos)
    }

    /// The most recent successful report, `row,col,FACING`.
    pub fn last_report(&self) -> Option<&str> {
        self.last_report.as_deref()
    }

    /// Verb of the most recent non-empty command.
    pub fn last_command(&self) -> Option<&str> {
        self.last_command.as_deref()
    }

    /// Status of the most recent non-empty command.
    pub fn last_status(&self) -> Option<StatusKind> {
        self.last_status
    }

    /// Message of the most recent non-empty command.
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// Resolve signed axis values to a cell on this grid.
    pub fn locate(&self, row: i64, col: i64) -> Result<Position, PlacementError> {
        Position::checked(row, col, self.grid_size).ok_or(PlacementError::OutOfBounds {
            row,
            col,
            grid_size: self.grid_size,
        })
    }

    // ── Transitions ─────────────────────────────────────────────

    /// A new state with the robot replaced wholesale by `robot`.
    ///
    /// Fails if the cell is off the grid or holds a wall.
    pub fn placing_robot(&self, robot: Robot) -> Result<Self, PlacementError> {
        let pos = robot.position;
        self.locate(i64::from(pos.row), i64::from(pos.col))?;
        if self.walls.contains(&pos) {
            return Err(PlacementError::RobotOnWall(pos));
        }
        Ok(self.with_robot(robot))
    }

    /// A new state with a wall appended at `pos`.
    ///
    /// Fails if the cell is off the grid, holds the robot, or already
    /// holds a wall.
    pub fn placing_wall(&self, pos: Position) -> Result<Self, PlacementError> {
        self.locate(i64::from(pos.row), i64::from(pos.col))?;
        if self.robot.is_some_and(|r| r.position == pos) {
            return Err(PlacementError::WallOnRobot(pos));
        }
        if self.walls.contains(&pos) {
            return Err(PlacementError::WallExists(pos));
        }
        let mut next = self.clone();
        next.walls.insert(pos);
        Ok(next)
    }

    /// A new state with the robot advanced one cell, wrapping at edges,
    /// along with the moved robot.
    ///
    /// Fails with [`MotionError::Blocked`] carrying the target cell if it
    /// holds a wall; position and facing are then unchanged.
    pub fn advancing(&self) -> Result<(Self, Robot), MotionError> {
        let robot = self.robot.ok_or(MotionError::NotPlaced)?;
        let target = robot.position.step(robot.facing, self.grid_size);
        if self.walls.contains(&target) {
            return Err(MotionError::Blocked(target));
        }
        let moved = Robot::new(target, robot.facing);
        Ok((self.with_robot(moved), moved))
    }

    /// A new state with the robot rotated one step, along with the
    /// rotated robot.
    pub fn turning(&self, turn: Turn) -> Result<(Self, Robot), MotionError> {
        let robot = self.robot.ok_or(MotionError::NotPlaced)?;
        let turned = Robot::new(robot.position, turn.apply(robot.facing));
        Ok((self.with_robot(turned), turned))
    }

    /// A new state whose `last_report` is the robot's `row,col,FACING`,
    /// along with that report string.
    pub fn reporting(&self) -> Result<(Self, String), MotionError> {
        let robot = self.robot.ok_or(MotionError::NotPlaced)?;
        let report = robot.to_string();
        let next = Self {
            last_report: Some(report.clone()),
            ..self.clone()
        };
        Ok((next, report))
    }

    /// An empty state on the same grid.
    pub fn cleared(&self) -> Self {
        Self {
            grid_size: self.grid_size,
            ..Self::default()
        }
    }

    fn with_robot(&self, robot: Robot) -> Self {
        Self {
            robot: Some(robot),
            ..self.clone()
        }
    }

    /// Stamp the bookkeeping fields for a processed command.
    pub fn recorded(mut self, verb: &str, status: StatusKind, message: &str) -> Self {
        self.last_command = Some(verb.to_string());
        self.last_status = Some(status);
        self.last_message = Some(message.to_string());
        self
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            robot: None,
            walls: IndexSet::new(),
            last_report: None,
            last_command: None,
            last_status: None,
            last_message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: u32, col: u32) -> Position {
        Position::new(row, col)
    }

    fn placed(row: u32, col: u32, facing: Facing) -> SimulationState {
        SimulationState::default()
            .placing_robot(Robot::new(p(row, col), facing))
            .unwrap()
    }

    #[test]
    fn new_rejects_empty_grid() {
        assert_eq!(SimulationState::new(0), Err(GridError::EmptyGrid));
        assert_eq!(SimulationState::new(7).unwrap().grid_size(), 7);
    }

    #[test]
    fn default_is_empty() {
        let s = SimulationState::default();
        assert_eq!(s.grid_size(), GRID_SIZE);
        assert!(s.robot().is_none());
        assert_eq!(s.wall_count(), 0);
        assert!(s.last_report().is_none());
        assert!(s.last_command().is_none());
        assert!(s.last_status().is_none());
    }

    // ── Placement ───────────────────────────────────────────────

    #[test]
    fn placing_robot_replaces_wholesale() {
        let s = placed(1, 1, Facing::North);
        let s = s.placing_robot(Robot::new(p(3, 4), Facing::West)).unwrap();
        assert_eq!(s.robot(), Some(Robot::new(p(3, 4), Facing::West)));
    }

    #[test]
    fn placing_robot_off_grid_fails() {
        let s = SimulationState::default();
        let err = s
            .placing_robot(Robot::new(p(9, 1), Facing::North))
            .unwrap_err();
        assert!(matches!(err, PlacementError::OutOfBounds { row: 9, .. }));
    }

    #[test]
    fn placing_robot_on_wall_fails() {
        let s = SimulationState::default().placing_wall(p(2, 2)).unwrap();
        let err = s
            .placing_robot(Robot::new(p(2, 2), Facing::East))
            .unwrap_err();
        assert_eq!(err, PlacementError::RobotOnWall(p(2, 2)));
    }

    #[test]
    fn placing_wall_on_robot_fails() {
        let s = placed(3, 3, Facing::South);
        assert_eq!(
            s.placing_wall(p(3, 3)).unwrap_err(),
            PlacementError::WallOnRobot(p(3, 3))
        );
    }

    #[test]
    fn placing_duplicate_wall_fails() {
        let s = SimulationState::default().placing_wall(p(4, 4)).unwrap();
        assert_eq!(
            s.placing_wall(p(4, 4)).unwrap_err(),
            PlacementError::WallExists(p(4, 4))
        );
        assert_eq!(s.wall_count(), 1);
    }

    #[test]
    fn walls_keep_insertion_order() {
        let s = SimulationState::default()
            .placing_wall(p(5, 5))
            .unwrap()
            .placing_wall(p(1, 1))
            .unwrap()
            .placing_wall(p(3, 2))
            .unwrap();
        let order: Vec<_> = s.walls().iter().copied().collect();
        assert_eq!(order, vec![p(5, 5), p(1, 1), p(3, 2)]);
    }

    // ── Motion ──────────────────────────────────────────────────

    #[test]
    fn advancing_without_robot_fails() {
        assert_eq!(
            SimulationState::default().advancing().unwrap_err(),
            MotionError::NotPlaced
        );
    }

    #[test]
    fn advancing_north_increases_row() {
        let (s, robot) = placed(1, 1, Facing::North).advancing().unwrap();
        assert_eq!(robot, Robot::new(p(2, 1), Facing::North));
        assert_eq!(s.robot(), Some(robot));
    }

    #[test]
    fn advancing_wraps_each_edge() {
        let cases = [
            ((5, 2, Facing::North), (1, 2)),
            ((1, 2, Facing::South), (5, 2)),
            ((2, 5, Facing::East), (2, 1)),
            ((2, 1, Facing::West), (2, 5)),
        ];
        for ((r, c, f), (er, ec)) in cases {
            let (s, _) = placed(r, c, f).advancing().unwrap();
            assert_eq!(s.robot(), Some(Robot::new(p(er, ec), f)));
        }
    }

    #[test]
    fn advancing_into_wall_is_blocked() {
        let s = SimulationState::default()
            .placing_wall(p(2, 1))
            .unwrap()
            .placing_robot(Robot::new(p(1, 1), Facing::North))
            .unwrap();
        assert_eq!(s.advancing().unwrap_err(), MotionError::Blocked(p(2, 1)));
    }

    #[test]
    fn advancing_into_wrapped_wall_is_blocked() {
        let s = SimulationState::default()
            .placing_wall(p(1, 3))
            .unwrap()
            .placing_robot(Robot::new(p(5, 3), Facing::North))
            .unwrap();
        assert_eq!(s.advancing().unwrap_err(), MotionError::Blocked(p(1, 3)));
    }

    #[test]
    fn turning_keeps_position() {
        let s = placed(2, 3, Facing::North);
        let (l, _) = s.turning(Turn::Left).unwrap();
        let (r, turned) = s.turning(Turn::Right).unwrap();
        assert_eq!(l.robot(), Some(Robot::new(p(2, 3), Facing::West)));
        assert_eq!(r.robot(), Some(Robot::new(p(2, 3), Facing::East)));
        assert_eq!(r.robot(), Some(turned));
    }

    // ── Report ──────────────────────────────────────────────────

    #[test]
    fn reporting_sets_last_report() {
        let (s, report) = placed(1, 2, Facing::West).reporting().unwrap();
        assert_eq!(report, "1,2,WEST");
        assert_eq!(s.last_report(), Some("1,2,WEST"));
    }

    #[test]
    fn reporting_is_idempotent() {
        let (s1, r1) = placed(4, 5, Facing::South).reporting().unwrap();
        let (s2, r2) = s1.reporting().unwrap();
        assert_eq!(r1, r2);
        assert_eq!(s1, s2);
    }

    #[test]
    fn other_transitions_keep_last_report() {
        let (s, _) = placed(1, 1, Facing::North).reporting().unwrap();
        let (s, _) = s.advancing().unwrap();
        let (s, _) = s.turning(Turn::Right).unwrap();
        assert_eq!(s.last_report(), Some("1,1,NORTH"));
    }

    #[test]
    fn cleared_keeps_grid_size_only() {
        let s = SimulationState::new(9)
            .unwrap()
            .placing_wall(p(7, 7))
            .unwrap()
            .recorded("PLACE_WALL", StatusKind::Ok, "OK: WALL_PLACED 7,7");
        let c = s.cleared();
        assert_eq!(c.grid_size(), 9);
        assert_eq!(c.wall_count(), 0);
        assert!(c.last_command().is_none());
    }

    #[test]
    fn recorded_stamps_bookkeeping() {
        let s = SimulationState::default().recorded(
            "MOVE",
            StatusKind::NotPlaced,
            "ERROR: ROBOT_NOT_PLACED",
        );
        assert_eq!(s.last_command(), Some("MOVE"));
        assert_eq!(s.last_status(), Some(StatusKind::NotPlaced));
        assert_eq!(s.last_message(), Some("ERROR: ROBOT_NOT_PLACED"));
        assert!(s.robot().is_none());
    }
}
