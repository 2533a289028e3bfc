//! Grid geometry: 1-based positions, bounds checks, and wrap-around stepping.

use std::fmt;

use crate::error::GridError;
use crate::facing::Facing;

/// Default side length of the square grid.
pub const GRID_SIZE: u32 = 5;

/// Largest accepted side length.
pub const MAX_GRID_SIZE: u32 = 4096;

/// Validate a grid side length.
///
/// Returns `Err(GridError::EmptyGrid)` for zero, or
/// `Err(GridError::DimensionTooLarge)` above [`MAX_GRID_SIZE`].
pub fn validate_grid_size(size: u32) -> Result<u32, GridError> {
    if size == 0 {
        return Err(GridError::EmptyGrid);
    }
    if size > MAX_GRID_SIZE {
        return Err(GridError::DimensionTooLarge {
            value: size,
            max: MAX_GRID_SIZE,
        });
    }
    Ok(size)
}

/// Whether a single axis value lies in `[1, size]`.
pub fn in_bounds(value: i64, size: u32) -> bool {
    value >= 1 && value <= i64::from(size)
}

/// Resolve an axis value onto `[1, size]` with periodic wrap.
///
/// Stepping past `size` re-enters at 1; stepping below 1 re-enters at `size`.
pub fn wrap_axis(value: i64, size: u32) -> u32 {
    let n = i64::from(size.max(1));
    // Shift to 0-based, wrap, shift back.
    ((value - 1).rem_euclid(n) + 1) as u32
}

/// A cell on the grid, addressed by 1-based `(row, col)`.
///
/// Row increases toward [`Facing::North`]; column increases toward
/// [`Facing::East`].
///
/// # Examples
///
/// ```
/// use gridbot_core::{Facing, Position};
///
/// let top = Position::new(5, 3);
/// // Stepping north off the top edge wraps to row 1.
/// assert_eq!(top.step(Facing::North, 5), Position::new(1, 3));
/// assert_eq!(top.to_string(), "5,3");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// 1-based row.
    pub row: u32,
    /// 1-based column.
    pub col: u32,
}

impl Position {
    /// Create a position without bounds checking.
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Build a position from signed axis values, or `None` if either
    /// axis falls outside `[1, size]`.
    pub fn checked(row: i64, col: i64, size: u32) -> Option<Self> {
        if in_bounds(row, size) && in_bounds(col, size) {
            Some(Self::new(row as u32, col as u32))
        } else {
            None
        }
    }

    /// Whether this position lies on a grid of side `size`.
    pub fn is_within(self, size: u32) -> bool {
        in_bounds(i64::from(self.row), size) && in_bounds(i64::from(self.col), size)
    }

    /// The neighbouring cell one step toward `facing`, wrapping at edges.
    pub fn step(self, facing: Facing, size: u32) -> Self {
        let (dr, dc) = facing.offset();
        Self {
            row: wrap_axis(i64::from(self.row) + dr, size),
            col: wrap_axis(i64::from(self.col) + dc, size),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}
