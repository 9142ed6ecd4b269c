/*!
 * Process-wide rate limiting for outbound translation requests.
 *
 * A single RateLimiter instance is shared by every worker in the pool, so
 * the total outbound request rate is bounded regardless of concurrency.
 * The limiter also tracks consecutive failures and widens the interval
 * exponentially once a threshold is crossed.
 */

use std::time::Duration;
use parking_lot::Mutex;
use tokio::time::Instant;

/// Number of consecutive failures before the interval starts widening
const FAILURE_THRESHOLD: u32 = 3;

/// Cap on the backoff exponent, keeps the widened interval bounded
const MAX_BACKOFF_EXPONENT: u32 = 4;

/// Mutable limiter state, guarded by a single mutex
#[derive(Debug)]
struct RateState {
    /// Instant at which the most recently granted request was allowed to fire
    last_grant: Option<Instant>,
    /// Failures since the last success, shared across all workers
    consecutive_failures: u32,
}

/// Enforces a minimum interval between granted requests
#[derive(Debug)]
pub struct RateLimiter {
    /// Base minimum interval between requests
    min_interval: Duration,
    state: Mutex<RateState>,
}

impl RateLimiter {
    /// Create a limiter with the given base interval
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            state: Mutex::new(RateState {
                last_grant: None,
                consecutive_failures: 0,
            }),
        }
    }

    /// Suspend the caller until a request is permitted
    ///
    /// The grant slot is claimed under the lock before sleeping, so two
    /// workers can never compute their wait from the same stale timestamp.
    pub async fn acquire(&self) {
        let grant_at = {
            let mut state = self.state.lock();
            let interval = self.effective_interval(state.consecutive_failures);
            let now = Instant::now();
            let grant_at = match state.last_grant {
                Some(last) => (last + interval).max(now),
                None => now,
            };
            state.last_grant = Some(grant_at);
            grant_at
        };

        tokio::time::sleep_until(grant_at).await;
    }

    /// Record a successful request, resetting the failure counter
    pub fn record_success(&self) {
        self.state.lock().consecutive_failures = 0;
    }

    /// Record a failed request
    pub fn record_failure(&self) {
        let mut state = self.state.lock();
        state.consecutive_failures = state.consecutive_failures.saturating_add(1);
    }

    /// Failures since the last success
    pub fn consecutive_failures(&self) -> u32 {
        self.state.lock().consecutive_failures
    }

    /// Interval currently in force, widened after repeated failures
    ///
    /// Below the threshold the base interval applies; past it, the
    /// interval doubles per additional threshold step, capped.
    fn effective_interval(&self, failures: u32) -> Duration {
        if failures < FAILURE_THRESHOLD {
            return self.min_interval;
        }
        let exponent = (failures / FAILURE_THRESHOLD).min(MAX_BACKOFF_EXPONENT);
        self.min_interval * (1u32 << exponent)
    }

    /// Interval currently in force, for logging and tests
    pub fn current_interval(&self) -> Duration {
        let failures = self.state.lock().consecutive_failures;
        self.effective_interval(failures)
    }
}
