//! Driver state machine and session lifecycle tests.

use pretty_assertions::assert_eq;
use rstest::rstest;
use scalarsim_core::{DriverState, Policy, Program, Session};

use crate::common::{example_driver, run_checked};

#[rstest]
#[case::in_in(Policy::IN_IN)]
#[case::in_out(Policy::IN_OUT)]
#[case::out_out(Policy::OUT_OUT)]
fn test_idle_running_completed_progression(#[case] policy: Policy) {
    let mut driver = example_driver(policy);
    assert_eq!(driver.state(), DriverState::Idle);

    let history = run_checked(&mut driver, 100);
    // Running throughout, Completed exactly at the end.
    for snap in &history[1..history.len() - 1] {
        assert_eq!(snap.state, DriverState::Running);
    }
    assert_eq!(history.last().unwrap().state, DriverState::Completed);
}

#[test]
fn test_completed_is_terminal() {
    let mut driver = example_driver(Policy::IN_IN);
    let end = run_checked(&mut driver, 100).last().unwrap().cycle;

    for _ in 0..3 {
        let snap = driver.step();
        assert_eq!(snap.cycle, end);
        assert_eq!(snap.state, DriverState::Completed);
    }
}

#[rstest]
#[case::after_one(1)]
#[case::after_three(3)]
#[case::after_completion(20)]
fn test_reset_reproduces_initial_snapshot(#[case] steps: usize) {
    let mut driver = example_driver(Policy::IN_IN);
    let initial = driver.snapshot();

    for _ in 0..steps {
        let _ = driver.step();
    }
    driver.reset();

    assert_eq!(driver.snapshot(), initial);
    assert_eq!(driver.state(), DriverState::Idle);
    assert_eq!(driver.cycle(), 0);

    // The reset driver replays the run identically.
    let replayed = run_checked(&mut driver, 100);
    assert_eq!(replayed.last().unwrap().cycle, 7);
}

#[test]
fn test_policy_change_between_ticks() {
    let mut driver = example_driver(Policy::IN_IN);
    let _ = driver.step();
    driver.set_policy(Policy::IN_OUT);
    assert_eq!(driver.policy(), Policy::IN_OUT);
    let _ = run_checked(&mut driver, 100);
}

#[test]
fn test_done_count_monotonic_and_complete() {
    let mut driver = example_driver(Policy::OUT_OUT);
    let history = run_checked(&mut driver, 100);

    let mut prev = 0;
    for snap in &history {
        let done = snap.done_count();
        assert!(done >= prev);
        prev = done;
    }
    assert_eq!(prev, 6);
    assert_eq!(driver.stats().committed, 6);
}

#[test]
fn test_session_reset_cancels_playback() {
    let mut session = Session::new(Program::example(), Policy::IN_IN);
    session.play(std::time::Duration::from_millis(1));
    let snap = session.reset();
    assert!(!session.is_playing());
    assert_eq!(snap.cycle, 0);
    assert_eq!(snap.state, DriverState::Idle);
}
