//! The pure reducer: `(state, command) -> (state, outcome)`.
//!
//! [`apply`] owns no clocks, channels or I/O. Every failure a command can
//! meet is folded into the returned [`Outcome`] as a [`StatusKind`]; the
//! prior state is borrowed and never modified.

use gridbot_core::{
    Command, Facing, MotionError, Notification, Outcome, PlacementError, Robot, Severity,
    SimulationState, StatusKind, Turn, Verb,
};

/// Display lifetime of a `NOT_PLACED` warning.
pub const NOT_PLACED_MS: u64 = 3200;
/// Display lifetime of a `MOVE_BLOCKED` error.
pub const BLOCKED_MS: u64 = 3400;
/// Display lifetime of an `INVALID_COMMAND` error.
pub const INVALID_MS: u64 = 3600;
/// Display lifetime of a `REPORT` notice.
pub const REPORT_MS: u64 = 3000;

/// Result of applying one command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// The state after the command.
    pub state: SimulationState,
    /// What happened, or `None` for the blank-input sentinel.
    pub outcome: Option<Outcome>,
}

impl Transition {
    /// Split into `(state, outcome)`.
    pub fn into_parts(self) -> (SimulationState, Option<Outcome>) {
        (self.state, self.outcome)
    }
}

/// Apply `command` to `state`.
///
/// Verbs are matched case-sensitively against their canonical uppercase
/// names. The empty command is a no-op that yields an unchanged state and
/// no outcome. Every other command yields exactly one [`Outcome`] and
/// stamps `last_command`, `last_status` and `last_message` on the new state.
///
/// # Examples
///
/// ```
/// use gridbot_core::{SimulationState, StatusKind};
/// use gridbot_engine::{apply, parse};
///
/// let s0 = SimulationState::default();
/// let t = apply(&s0, &parse("PLACE_ROBOT 1,1,NORTH"));
/// assert_eq!(t.outcome.unwrap().status, StatusKind::Ok);
///
/// let t = apply(&t.state, &parse("MOVE"));
/// assert_eq!(t.outcome.unwrap().message, "OK: MOVED 2,1");
/// ```
pub fn apply(state: &SimulationState, command: &Command) -> Transition {
    if command.is_empty() {
        return Transition {
            state: state.clone(),
            outcome: None,
        };
    }

    let (next, status, message, notification) = match Verb::from_name(&command.verb) {
        Some(Verb::PlaceRobot) => place_robot(state, command),
        Some(Verb::PlaceWall) => place_wall(state, command),
        Some(Verb::Move) => advance(state),
        Some(Verb::Left) => turn(state, Turn::Left),
        Some(Verb::Right) => turn(state, Turn::Right),
        Some(Verb::Report) => report(state),
        None => {
            let message = format!("ERROR: UNKNOWN_CMD {}", command.verb);
            (state.clone(), StatusKind::Invalid, message, None)
        }
    };

    // Every INVALID carries an error notification.
    let notification = match (status, notification) {
        (StatusKind::Invalid, None) => Some(
            Notification::new(Severity::Error, "INVALID_COMMAND", message.clone())
                .lasting_ms(INVALID_MS),
        ),
        (_, n) => n,
    };

    let next = next.recorded(&command.verb, status, &message);
    let outcome = Outcome::new(&command.raw, status, message, notification);
    Transition {
        state: next,
        outcome: Some(outcome),
    }
}

type Step = (SimulationState, StatusKind, String, Option<Notification>);

fn invalid(state: &SimulationState, message: String) -> Step {
    (state.clone(), StatusKind::Invalid, message, None)
}

fn not_placed(state: &SimulationState) -> Step {
    let notification = Notification::new(
        Severity::Warning,
        "ROBOT_NOT_PLACED",
        "Place the robot first (PLACE_ROBOT).",
    )
    .lasting_ms(NOT_PLACED_MS);
    (
        state.clone(),
        StatusKind::NotPlaced,
        "ERROR: ROBOT_NOT_PLACED".to_string(),
        Some(notification),
    )
}

/// Strict base-10 signed parse of a row/col token.
fn parse_axis(token: &str) -> Option<i64> {
    token.parse::<i64>().ok()
}

fn place_robot(state: &SimulationState, command: &Command) -> Step {
    const BAD: &str = "ERROR: INVALID PLACE_ROBOT";

    let [row, col, facing] = command.args.as_slice() else {
        return invalid(state, BAD.to_string());
    };
    let (Some(row), Some(col), Ok(facing)) =
        (parse_axis(row), parse_axis(col), facing.parse::<Facing>())
    else {
        return invalid(state, BAD.to_string());
    };
    let Ok(position) = state.locate(row, col) else {
        return invalid(state, BAD.to_string());
    };

    let robot = Robot::new(position, facing);
    match state.placing_robot(robot) {
        Ok(next) => {
            let notification = Notification::new(Severity::Success, "ROBOT_PLACED", robot.to_string());
            (
                next,
                StatusKind::Ok,
                format!("OK: PLACED {robot}"),
                Some(notification),
            )
        }
        Err(PlacementError::RobotOnWall(pos)) => {
            invalid(state, format!("ERROR: ROBOT_ON_WALL {pos}"))
        }
        Err(_) => invalid(state, BAD.to_string()),
    }
}

fn place_wall(state: &SimulationState, command: &Command) -> Step {
    const BAD: &str = "ERROR: INVALID PLACE_WALL";

    let [row, col] = command.args.as_slice() else {
        return invalid(state, BAD.to_string());
    };
    let (Some(row), Some(col)) = (parse_axis(row), parse_axis(col)) else {
        return invalid(state, BAD.to_string());
    };
    let Ok(position) = state.locate(row, col) else {
        return invalid(state, BAD.to_string());
    };

    match state.placing_wall(position) {
        Ok(next) => {
            let notification =
                Notification::new(Severity::Success, "WALL_PLACED", position.to_string());
            (
                next,
                StatusKind::Ok,
                format!("OK: WALL_PLACED {position}"),
                Some(notification),
            )
        }
        Err(PlacementError::WallOnRobot(pos)) => {
            invalid(state, format!("ERROR: WALL_ON_ROBOT {pos}"))
        }
        Err(PlacementError::WallExists(pos)) => {
            invalid(state, format!("ERROR: WALL_EXISTS {pos}"))
        }
        Err(_) => invalid(state, BAD.to_string()),
    }
}

fn advance(state: &SimulationState) -> Step {
    match state.advancing() {
        Ok((next, robot)) => (
            next,
            StatusKind::Ok,
            format!("OK: MOVED {}", robot.position),
            None,
        ),
        Err(MotionError::NotPlaced) => not_placed(state),
        Err(MotionError::Blocked(target)) => {
            let message = format!("ERROR: BLOCKED {target}");
            let notification = Notification::new(Severity::Error, "MOVE_BLOCKED", message.clone())
                .lasting_ms(BLOCKED_MS);
            (
                state.clone(),
                StatusKind::Blocked,
                message,
                Some(notification),
            )
        }
    }
}

fn turn(state: &SimulationState, turn: Turn) -> Step {
    match state.turning(turn) {
        Ok((next, robot)) => (
            next,
            StatusKind::Ok,
            format!("OK: FACING {}", robot.facing),
            None,
        ),
        Err(_) => not_placed(state),
    }
}

fn report(state: &SimulationState) -> Step {
    match state.reporting() {
        Ok((next, report)) => {
            let notification =
                Notification::new(Severity::Info, "REPORT", report.clone()).lasting_ms(REPORT_MS);
            (
                next,
                StatusKind::Ok,
                format!("REPORT: {report}"),
                Some(notification),
            )
        }
        Err(_) => not_placed(state),
    }
}
