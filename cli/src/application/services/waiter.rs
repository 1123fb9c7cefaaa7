//! Fixed-interval polling until a resource reaches an expected state.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::Clock;
use crate::domain::WaitError;

/// Seconds between polls. Unconditional — no backoff, no jitter.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Poll `fetch` until it yields `expected` or `timeout` elapses.
///
/// The status is fetched immediately, so a resource already in the expected
/// state never sleeps. The deadline is checked after each sleep; with
/// `timeout` equal to the poll interval that makes exactly one poll before
/// giving up.
///
/// # Errors
///
/// Propagates `fetch` failures; [`WaitError::Timeout`] carries the last
/// observed state once the deadline passes without a match.
pub fn wait_for(
    clock: &impl Clock,
    what: &str,
    expected: &str,
    timeout: Duration,
    mut fetch: impl FnMut() -> Result<String>,
) -> Result<()> {
    let deadline = clock.now() + timeout;
    loop {
        let observed = fetch()?;
        if observed == expected {
            return Ok(());
        }
        clock.sleep(POLL_INTERVAL);
        if clock.now() >= deadline {
            return Err(WaitError::Timeout {
                what: what.to_string(),
                expected: expected.to_string(),
                last_observed: observed,
            }
            .into());
        }
    }
}
