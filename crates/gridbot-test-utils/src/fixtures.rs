//! Canned command scripts.
//!
//! Each script pairs with the final status and robot it must produce on a
//! default 5x5 grid.

use gridbot_core::{Facing, StatusKind};

/// A command script with its expected end.
#[derive(Clone, Copy, Debug)]
pub struct Script {
    pub name: &'static str,
    pub lines: &'static [&'static str],
    /// Status of the final command.
    pub final_status: StatusKind,
    /// Robot after the final command.
    pub robot: Option<(u32, u32, Facing)>,
}

/// Place, move north, turn left, report.
pub const PLACE_MOVE_TURN_REPORT: Script = Script {
    name: "place_move_turn_report",
    lines: &["PLACE_ROBOT 1,1,NORTH", "MOVE", "LEFT", "REPORT"],
    final_status: StatusKind::Ok,
    robot: Some((2, 1, Facing::West)),
};

/// A wall directly ahead stops the robot.
pub const BLOCKED_BY_WALL: Script = Script {
    name: "blocked_by_wall",
    lines: &["PLACE_WALL 2,1", "PLACE_ROBOT 1,1,NORTH", "MOVE"],
    final_status: StatusKind::Blocked,
    robot: Some((1, 1, Facing::North)),
};

/// Moving before placing.
pub const MOVE_UNPLACED: Script = Script {
    name: "move_unplaced",
    lines: &["MOVE"],
    final_status: StatusKind::NotPlaced,
    robot: None,
};

/// Placing off the grid.
pub const PLACE_OUT_OF_BOUNDS: Script = Script {
    name: "place_out_of_bounds",
    lines: &["PLACE_ROBOT 9,1,NORTH"],
    final_status: StatusKind::Invalid,
    robot: None,
};

/// An unrecognised verb.
pub const UNKNOWN_VERB: Script = Script {
    name: "unknown_verb",
    lines: &["FOO"],
    final_status: StatusKind::Invalid,
    robot: None,
};

/// A full lap north wraps back to the start.
pub const NORTH_LAP: Script = Script {
    name: "north_lap",
    lines: &[
        "PLACE_ROBOT 3,2,NORTH",
        "MOVE",
        "MOVE",
        "MOVE",
        "MOVE",
        "MOVE",
    ],
    final_status: StatusKind::Ok,
    robot: Some((3, 2, Facing::North)),
};

/// A wall reached only by wrapping west off column 1.
pub const WRAPPED_WALL: Script = Script {
    name: "wrapped_wall",
    lines: &["PLACE_WALL 4,5", "PLACE_ROBOT 4,1,WEST", "MOVE"],
    final_status: StatusKind::Blocked,
    robot: Some((4, 1, Facing::West)),
};

/// Every canned script.
pub const ALL: &[Script] = &[
    PLACE_MOVE_TURN_REPORT,
    BLOCKED_BY_WALL,
    MOVE_UNPLACED,
    PLACE_OUT_OF_BOUNDS,
    UNKNOWN_VERB,
    NORTH_LAP,
    WRAPPED_WALL,
];
