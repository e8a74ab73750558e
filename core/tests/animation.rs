//! Animation clock behavior with a real timer thread: the phase advances
//! while running, stays in range, freezes permanently once stopped, and
//! stop() is idempotent.

use std::time::Duration;

use zotlayer_core::clock::AnimationClock;

#[test]
fn running_clock_advances_the_phase() {
    let mut clock = AnimationClock::start(Duration::from_millis(2), 5.0);
    std::thread::sleep(Duration::from_millis(60));
    let phase = clock.phase_degrees();
    clock.stop();
    assert!(phase > 0.0, "phase never advanced: {phase}");
}

#[test]
fn phase_is_always_in_range_while_running() {
    // Fast ticks with a large step so the wrap happens many times.
    let mut clock = AnimationClock::start(Duration::from_millis(1), 90.0);
    for _ in 0..50 {
        let phase = clock.phase_degrees();
        assert!(
            (0.0..360.0).contains(&phase),
            "phase out of range: {phase}"
        );
        std::thread::sleep(Duration::from_millis(2));
    }
    clock.stop();
}

/// stop() joins the timer thread, so no tick can land afterwards. The
/// phase read immediately after stop() must still be the phase much later.
#[test]
fn stop_freezes_the_phase() {
    let mut clock = AnimationClock::start(Duration::from_millis(2), 5.0);
    std::thread::sleep(Duration::from_millis(20));
    clock.stop();

    let frozen = clock.phase_degrees();
    std::thread::sleep(Duration::from_millis(30));
    assert_eq!(clock.phase_degrees(), frozen);
}

#[test]
fn stop_is_idempotent() {
    let mut clock = AnimationClock::start(Duration::from_millis(2), 5.0);
    clock.stop();
    clock.stop();
    clock.stop();
}

#[test]
fn phase_starts_at_zero() {
    let mut clock = AnimationClock::start(Duration::from_secs(3600), 5.0);
    assert_eq!(clock.phase_degrees(), 0.0);
    clock.stop();
}
