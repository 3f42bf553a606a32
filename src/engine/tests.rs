use std::thread::sleep;
use std::time::Duration;

use super::clock::TransportClock;

#[test]
fn new_clock_reads_zero_and_is_stopped() {
    let clock = TransportClock::new();
    assert_eq!(clock.elapsed(), Duration::ZERO);
    assert!(!clock.is_running());
}

#[test]
fn clock_advances_while_running() {
    let mut clock = TransportClock::new();
    clock.start();
    sleep(Duration::from_millis(30));
    assert!(clock.elapsed() >= Duration::from_millis(30));
    assert!(clock.is_running());
}

#[test]
fn stop_freezes_the_reading() {
    let mut clock = TransportClock::new();
    clock.start();
    sleep(Duration::from_millis(20));
    clock.stop();

    let frozen = clock.elapsed();
    assert!(frozen >= Duration::from_millis(20));
    sleep(Duration::from_millis(20));
    assert_eq!(clock.elapsed(), frozen);
}

#[test]
fn start_is_idempotent_while_running() {
    let mut clock = TransportClock::new();
    clock.start();
    sleep(Duration::from_millis(20));
    // A second start must not rewind the running stretch.
    clock.start();
    assert!(clock.elapsed() >= Duration::from_millis(20));
}

#[test]
fn set_repositions_a_stopped_clock_exactly() {
    let mut clock = TransportClock::new();
    clock.set(Duration::from_secs(90));
    assert_eq!(clock.elapsed(), Duration::from_secs(90));
    assert!(!clock.is_running());
}

#[test]
fn set_keeps_a_running_clock_running() {
    let mut clock = TransportClock::new();
    clock.start();
    sleep(Duration::from_millis(20));
    clock.set(Duration::from_secs(5));

    assert!(clock.is_running());
    sleep(Duration::from_millis(20));
    let elapsed = clock.elapsed();
    assert!(elapsed >= Duration::from_secs(5) + Duration::from_millis(20));
    assert!(elapsed < Duration::from_secs(6));
}

#[test]
fn reset_returns_to_zero_stopped() {
    let mut clock = TransportClock::new();
    clock.start();
    sleep(Duration::from_millis(10));
    clock.reset();
    assert_eq!(clock.elapsed(), Duration::ZERO);
    assert!(!clock.is_running());
}
