//! State waiter timing behavior, driven by the fake clock.

#![allow(clippy::expect_used)]

use std::cell::Cell;
use std::time::Duration;

use linkctl_cli::application::services::waiter::{self, POLL_INTERVAL};
use linkctl_cli::domain::WaitError;

use crate::mocks::FakeClock;

#[test]
fn succeeds_without_sleeping_when_already_in_state() {
    let clock = FakeClock::new();
    waiter::wait_for(&clock, "stack 1st7", "active", Duration::from_secs(360), || {
        Ok("active".to_string())
    })
    .expect("wait");
    assert_eq!(clock.elapsed(), Duration::ZERO);
}

#[test]
fn times_out_after_one_poll_when_timeout_equals_interval() {
    let clock = FakeClock::new();
    let polls = Cell::new(0u32);
    let err = waiter::wait_for(&clock, "service 1s42", "upgraded", Duration::from_secs(5), || {
        polls.set(polls.get() + 1);
        Ok("upgrading".to_string())
    })
    .expect_err("timeout");

    assert_eq!(polls.get(), 1);
    assert_eq!(clock.elapsed(), POLL_INTERVAL);
    let wait_err = err.downcast_ref::<WaitError>().expect("typed error");
    let WaitError::Timeout {
        expected,
        last_observed,
        ..
    } = wait_err;
    assert_eq!(expected, "upgraded");
    assert_eq!(last_observed, "upgrading");
}

#[test]
fn polls_at_fixed_intervals_until_the_state_matches() {
    let clock = FakeClock::new();
    let polls = Cell::new(0u32);
    waiter::wait_for(&clock, "stack 1st7", "upgraded", Duration::from_secs(360), || {
        polls.set(polls.get() + 1);
        Ok(if polls.get() < 3 { "upgrading" } else { "upgraded" }.to_string())
    })
    .expect("wait");

    assert_eq!(polls.get(), 3);
    assert_eq!(clock.elapsed(), POLL_INTERVAL * 2);
}

#[test]
fn fetch_errors_abort_the_wait() {
    let clock = FakeClock::new();
    let err = waiter::wait_for(&clock, "stack 1st7", "active", Duration::from_secs(360), || {
        anyhow::bail!("connection refused")
    })
    .expect_err("fetch failure");
    assert!(err.to_string().contains("connection refused"));
    assert_eq!(clock.elapsed(), Duration::ZERO);
}
