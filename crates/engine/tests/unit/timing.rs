//! Timed-access latency behavior.

use rstest::rstest;
use scalar_core::common::error::ProtocolError;
use scalar_core::common::timing::{access_latency, AccessTimer, DelayMode};

#[rstest]
#[case(4, 1, 4)]
#[case(1, 4, 1)]
#[case(100, 50, 2)]
#[case(50, 100, 1)]
#[case(3, 2, 2)]
#[case(7, 7, 1)]
fn latency_is_frequency_ratio_ceiling(
    #[case] requester_hz: u64,
    #[case] resource_hz: u64,
    #[case] expected: u64,
) {
    assert_eq!(access_latency(requester_hz, resource_hz), expected);
}

#[test]
fn fast_requester_slow_resource_waits_four_ticks() {
    // f_R = 4, f_X = 1: ready stays low for four resource ticks and
    // rises on the fourth.
    let mut timer = AccessTimer::new(DelayMode::Delayed);
    timer.request(4, 1).unwrap();

    timer.tick();
    assert!(!timer.is_ready());
    timer.tick();
    assert!(!timer.is_ready());

    // A second request issued mid-countdown must not reset it.
    timer.request(4, 1).unwrap();

    timer.tick();
    assert!(!timer.is_ready());
    timer.tick();
    assert!(timer.is_ready());
}

#[test]
fn asking_a_no_delay_resource_is_a_protocol_violation() {
    let mut timer = AccessTimer::new(DelayMode::Immediate);
    assert_eq!(timer.request(2, 1), Err(ProtocolError::RequestOnImmediate));
}
