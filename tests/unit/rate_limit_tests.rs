/*!
 * Tests for the shared rate limiter
 */

use std::sync::Arc;
use std::time::{Duration, Instant};
use futures::future::join_all;

use mass_translate::rate_limit::RateLimiter;

/// Test minimum spacing across sequential acquires
///
/// K rapid acquires must take at least (K-1) * interval in total.
#[tokio::test]
async fn test_acquire_withRapidSequentialCalls_shouldEnforceMinimumSpacing() {
    let limiter = RateLimiter::new(Duration::from_millis(50));
    let start = Instant::now();

    for _ in 0..4 {
        limiter.acquire().await;
    }

    assert!(
        start.elapsed() >= Duration::from_millis(150),
        "4 acquires finished in {:?}, expected at least 150ms",
        start.elapsed()
    );
}

/// Test that the bound holds with concurrent callers
///
/// The grant slot is claimed under the lock, so concurrent workers cannot
/// compute their wait from the same stale timestamp.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_acquire_withConcurrentCallers_shouldSerializeGrants() {
    let limiter = Arc::new(RateLimiter::new(Duration::from_millis(40)));
    let start = Instant::now();

    let tasks = (0..4).map(|_| {
        let limiter = limiter.clone();
        tokio::spawn(async move {
            limiter.acquire().await;
        })
    });
    join_all(tasks).await;

    assert!(
        start.elapsed() >= Duration::from_millis(120),
        "4 concurrent acquires finished in {:?}, expected at least 120ms",
        start.elapsed()
    );
}

/// Test that the first acquire is granted immediately
#[tokio::test]
async fn test_acquire_withFirstCall_shouldNotWait() {
    let limiter = RateLimiter::new(Duration::from_secs(60));
    let start = Instant::now();
    limiter.acquire().await;
    assert!(start.elapsed() < Duration::from_secs(1));
}

/// Test failure accounting across success and failure
#[test]
fn test_failure_counter_shouldTrackAndReset() {
    let limiter = RateLimiter::new(Duration::from_millis(100));
    assert_eq!(limiter.consecutive_failures(), 0);

    limiter.record_failure();
    limiter.record_failure();
    assert_eq!(limiter.consecutive_failures(), 2);

    limiter.record_success();
    assert_eq!(limiter.consecutive_failures(), 0);
}

/// Test interval widening after the failure threshold
#[test]
fn test_current_interval_withRepeatedFailures_shouldWidenExponentially() {
    let limiter = RateLimiter::new(Duration::from_millis(100));

    // Below the threshold the base interval applies
    limiter.record_failure();
    limiter.record_failure();
    assert_eq!(limiter.current_interval(), Duration::from_millis(100));

    // Crossing the threshold doubles the interval
    limiter.record_failure();
    assert_eq!(limiter.current_interval(), Duration::from_millis(200));

    // A success restores the base interval
    limiter.record_success();
    assert_eq!(limiter.current_interval(), Duration::from_millis(100));
}
