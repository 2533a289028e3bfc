//! Session and driver behaviour over realistic command streams.

use std::time::{Duration, Instant};

use gridbot_core::StatusKind;
use gridbot_engine::{
    DriverConfig, NotificationId, Session, SessionConfig, SessionDriver, SessionEvent,
};
use gridbot_test_utils::fixtures;

#[test]
fn session_runs_every_canned_script() {
    for script in fixtures::ALL {
        let mut session = Session::new(SessionConfig::default()).unwrap();
        let now = Instant::now();
        let mut last = None;
        for line in script.lines {
            last = session.submit(line, now).map(|o| o.status);
        }
        assert_eq!(last, Some(script.final_status), "{}", script.name);
        assert_eq!(
            session.log().len(),
            script.lines.len() * 2,
            "{}",
            script.name
        );
    }
}

#[test]
fn lowercase_input_works_under_default_policy() {
    let mut session = Session::new(SessionConfig::default()).unwrap();
    let now = Instant::now();
    for line in ["place_wall 2,1", "place_robot 1,1,north", "move"] {
        session.submit(line, now);
    }
    assert_eq!(session.last_status(), Some(StatusKind::Blocked));
}

#[test]
fn log_window_caps_at_two_hundred() {
    let mut session = Session::new(SessionConfig::default()).unwrap();
    let now = Instant::now();
    for _ in 0..150 {
        session.submit("MOVE", now);
    }
    assert_eq!(session.log().len(), 200);
    assert_eq!(session.metrics().log_entries_evicted, 100);
    assert_eq!(session.log().entries().next().map(|e| e.id), Some(101));
}

#[test]
fn notification_lifetimes_follow_outcome() {
    let mut session = Session::new(SessionConfig::default()).unwrap();
    let t0 = Instant::now();
    session.submit("MOVE", t0); // 3200 ms warning
    session.submit("FOO", t0); // 3600 ms error
    session.submit("PLACE_ROBOT 1,1,NORTH", t0); // default 2800 ms

    assert!(session.expire(t0 + Duration::from_millis(2799)).is_empty());
    assert_eq!(
        session.expire(t0 + Duration::from_millis(2800)),
        vec![NotificationId(3)]
    );
    assert_eq!(
        session.expire(t0 + Duration::from_millis(3200)),
        vec![NotificationId(1)]
    );
    assert_eq!(
        session.next_deadline(),
        Some(t0 + Duration::from_millis(3600))
    );
}

#[test]
fn driver_serializes_a_burst() {
    let session = Session::new(SessionConfig::default()).unwrap();
    let mut driver = SessionDriver::spawn(session, DriverConfig::default()).unwrap();
    driver.submit("PLACE_ROBOT 1,1,EAST").unwrap();
    for _ in 0..4 {
        driver.submit("MOVE").unwrap();
    }
    driver.submit("REPORT").unwrap();

    let mut applied = Vec::new();
    while applied.len() < 6 {
        match driver.events().recv_timeout(Duration::from_secs(5)) {
            Ok(SessionEvent::Applied { outcome, .. }) => applied.push(outcome.message),
            Ok(_) => {}
            Err(e) => panic!("driver stalled: {e}"),
        }
    }
    assert_eq!(applied[4], "OK: MOVED 1,5");
    assert_eq!(applied[5], "REPORT: 1,5,EAST");

    let session = driver.shutdown().unwrap();
    assert_eq!(session.state().last_report(), Some("1,5,EAST"));
    assert_eq!(session.metrics().commands_applied, 6);
}
