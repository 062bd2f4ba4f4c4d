//! Bounded, fixed-interval polling.
//!
//! There is no backoff: every pending check is followed by one interval, so
//! the total wait is bounded by `max_attempts × interval`, and every attempt
//! is a fresh check.

use std::thread;
use std::time::Duration;

/// Default delay between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default number of polls before giving up (about two minutes).
pub const DEFAULT_MAX_POLLS: u32 = 120;

/// How often and how long to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay between consecutive polls.
    pub interval: Duration,
    /// Maximum number of polls.
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_POLLS,
        }
    }
}

impl PollPolicy {
    /// Create a policy.
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    /// Upper bound on time spent waiting for a pending task.
    pub fn max_wait(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

/// What a single check observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStep<T, F> {
    /// Terminal success.
    Done(T),
    /// Terminal failure.
    Fail(F),
    /// Not finished yet.
    Pending,
}

/// Final result of a poll loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T, F> {
    /// The check reported success.
    Success(T),
    /// The check reported a terminal failure.
    Failed(F),
    /// Still pending after `attempts` checks.
    TimedOut { attempts: u32 },
}

/// Run `check` until it reports a terminal state or the attempts run out.
///
/// The check receives the 1-based attempt number. The first check runs
/// immediately; the policy's interval is slept after every pending check,
/// including the last, so a timeout is reported only once the full ceiling
/// has elapsed. A check error aborts the loop at once.
pub fn poll_until<T, F, E>(
    policy: &PollPolicy,
    mut check: impl FnMut(u32) -> Result<PollStep<T, F>, E>,
) -> Result<PollOutcome<T, F>, E> {
    for attempt in 1..=policy.max_attempts {
        match check(attempt)? {
            PollStep::Done(value) => return Ok(PollOutcome::Success(value)),
            PollStep::Fail(reason) => return Ok(PollOutcome::Failed(reason)),
            PollStep::Pending => {}
        }

        if !policy.interval.is_zero() {
            thread::sleep(policy.interval);
        }
    }

    Ok(PollOutcome::TimedOut {
        attempts: policy.max_attempts,
    })
}
