//! Property tests over random command streams.

use gridbot_core::{Facing, SimulationState, StatusKind};
use gridbot_engine::{apply, parse};
use proptest::prelude::*;

fn arb_facing_token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("NORTH".to_string()),
        Just("EAST".to_string()),
        Just("SOUTH".to_string()),
        Just("WEST".to_string()),
        Just("UP".to_string()),
    ]
}

fn arb_line() -> impl Strategy<Value = String> {
    prop_oneof![
        (-1i64..7, -1i64..7, arb_facing_token())
            .prop_map(|(r, c, f)| format!("PLACE_ROBOT {r},{c},{f}")),
        (-1i64..7, -1i64..7).prop_map(|(r, c)| format!("PLACE_WALL {r},{c}")),
        Just("MOVE".to_string()),
        Just("LEFT".to_string()),
        Just("RIGHT".to_string()),
        Just("REPORT".to_string()),
        Just("FOO".to_string()),
        Just("   ".to_string()),
    ]
}

fn run_all(lines: &[String]) -> SimulationState {
    lines.iter().fold(SimulationState::default(), |s, line| {
        apply(&s, &parse(line)).state
    })
}

proptest! {
    #[test]
    fn apply_is_pure(lines in prop::collection::vec(arb_line(), 0..24), last in arb_line()) {
        let state = run_all(&lines);
        let before = state.clone();
        let cmd = parse(&last);
        let a = apply(&state, &cmd);
        let b = apply(&state, &cmd);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(&state, &before);
    }

    #[test]
    fn robot_and_walls_stay_disjoint(lines in prop::collection::vec(arb_line(), 0..64)) {
        let mut state = SimulationState::default();
        for line in &lines {
            let walls_before = state.wall_count();
            state = apply(&state, &parse(line)).state;
            prop_assert!(state.wall_count() >= walls_before);
            if let Some(robot) = state.robot() {
                prop_assert!(robot.position.is_within(state.grid_size()));
                prop_assert!(!state.has_wall(robot.position));
            }
        }
    }

    #[test]
    fn non_ok_leaves_world_unchanged(lines in prop::collection::vec(arb_line(), 0..24), last in arb_line()) {
        let state = run_all(&lines);
        let t = apply(&state, &parse(&last));
        if let Some(outcome) = t.outcome {
            if outcome.status != StatusKind::Ok {
                prop_assert_eq!(t.state.robot(), state.robot());
                prop_assert_eq!(t.state.walls(), state.walls());
                prop_assert_eq!(t.state.last_report(), state.last_report());
            }
        } else {
            prop_assert_eq!(&t.state, &state);
        }
    }

    #[test]
    fn report_is_idempotent(r in 1i64..=5, c in 1i64..=5, f in 0u8..4, n in 1usize..6) {
        let facing = Facing::from_index(f).unwrap_or(Facing::North);
        let mut state = apply(
            &SimulationState::default(),
            &parse(&format!("PLACE_ROBOT {r},{c},{facing}")),
        )
        .state;
        let robot = state.robot();
        let mut reports = Vec::new();
        for _ in 0..n {
            let t = apply(&state, &parse("REPORT"));
            state = t.state;
            reports.push(t.outcome.map(|o| o.message));
        }
        prop_assert!(reports.windows(2).all(|w| w[0] == w[1]));
        prop_assert_eq!(state.robot(), robot);
    }

    #[test]
    fn four_turns_restore_facing(f in 0u8..4, left in any::<bool>()) {
        let facing = Facing::from_index(f).unwrap_or(Facing::North);
        let start = apply(
            &SimulationState::default(),
            &parse(&format!("PLACE_ROBOT 3,3,{facing}")),
        )
        .state;
        let verb = if left { "LEFT" } else { "RIGHT" };
        let mut state = start.clone();
        for _ in 0..4 {
            state = apply(&state, &parse(verb)).state;
        }
        prop_assert_eq!(state.robot(), start.robot());
    }
}
