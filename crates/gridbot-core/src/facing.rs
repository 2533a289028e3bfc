//! Cardinal facings and rotation.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseFacingError;

/// The direction the robot points, and the direction `MOVE` advances.
///
/// The variants form the cyclic order `NORTH → EAST → SOUTH → WEST`,
/// indexed 0..3. Rotation is arithmetic on that index mod 4.
///
/// # Examples
///
/// ```
/// use gridbot_core::Facing;
///
/// assert_eq!(Facing::North.right(), Facing::East);
/// assert_eq!(Facing::North.left(), Facing::West);
/// assert_eq!("SOUTH".parse::<Facing>().unwrap(), Facing::South);
/// assert!("south".parse::<Facing>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Facing {
    /// Toward increasing row.
    North = 0,
    /// Toward increasing column.
    East = 1,
    /// Toward decreasing row.
    South = 2,
    /// Toward decreasing column.
    West = 3,
}

impl Facing {
    /// All facings in cyclic order.
    pub const ALL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    /// Position of this facing in the cyclic order.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// The facing at `index`, or `None` if `index > 3`.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Counter-clockwise neighbour: index `(i + 3) mod 4`.
    pub fn left(self) -> Self {
        Self::ALL[(self.index() as usize + 3) % 4]
    }

    /// Clockwise neighbour: index `(i + 1) mod 4`.
    pub fn right(self) -> Self {
        Self::ALL[(self.index() as usize + 1) % 4]
    }

    /// Returns the `(row_offset, col_offset)` of one step in this facing.
    pub fn offset(self) -> (i64, i64) {
        match self {
            Facing::North => (1, 0),
            Facing::East => (0, 1),
            Facing::South => (-1, 0),
            Facing::West => (0, -1),
        }
    }

    /// Canonical uppercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Facing::North => "NORTH",
            Facing::East => "EAST",
            Facing::South => "SOUTH",
            Facing::West => "WEST",
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Facing {
    type Err = ParseFacingError;

    /// Case-sensitive: only the canonical uppercase names are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ParseFacingError {
                token: s.to_string(),
            })
    }
}

/// A single rotation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Turn {
    /// Rotate counter-clockwise.
    Left,
    /// Rotate clockwise.
    Right,
}

impl Turn {
    /// Apply this rotation to `facing`.
    pub fn apply(self, facing: Facing) -> Facing {
        match self {
            Turn::Left => facing.left(),
            Turn::Right => facing.right(),
        }
    }
}
