//! Test utilities and fixtures for Gridbot development.
//!
//! Provides a [`StateBuilder`] for constructing states without going
//! through the parser, and canned command scripts in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use gridbot_core::{Facing, Position, Robot, SimulationState, GRID_SIZE};

/// Builder for states with preplaced walls and robot.
///
/// Walls are placed first, in call order, then the robot. Panics if the
/// layout breaks a state invariant: fixtures are expected to be valid.
#[derive(Clone, Debug)]
pub struct StateBuilder {
    grid_size: u32,
    walls: Vec<(u32, u32)>,
    robot: Option<(u32, u32, Facing)>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            grid_size: GRID_SIZE,
            walls: Vec::new(),
            robot: None,
        }
    }

    pub fn grid_size(mut self, size: u32) -> Self {
        self.grid_size = size;
        self
    }

    pub fn wall(mut self, row: u32, col: u32) -> Self {
        self.walls.push((row, col));
        self
    }

    pub fn robot(mut self, row: u32, col: u32, facing: Facing) -> Self {
        self.robot = Some((row, col, facing));
        self
    }

    /// Build the state.
    pub fn build(self) -> SimulationState {
        let mut state = SimulationState::new(self.grid_size)
            .unwrap_or_else(|e| panic!("fixture grid size {}: {e}", self.grid_size));
        for (row, col) in self.walls {
            state = state
                .placing_wall(Position::new(row, col))
                .unwrap_or_else(|e| panic!("fixture wall {row},{col}: {e}"));
        }
        if let Some((row, col, facing)) = self.robot {
            state = state
                .placing_robot(Robot::new(Position::new(row, col), facing))
                .unwrap_or_else(|e| panic!("fixture robot {row},{col}: {e}"));
        }
        state
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for a robot's `(row, col, facing)`.
pub fn robot_triple(state: &SimulationState) -> Option<(u32, u32, Facing)> {
    state
        .robot()
        .map(|r| (r.position.row, r.position.col, r.facing))
}
