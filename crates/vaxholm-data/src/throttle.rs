//! Request pacing shared by every provider call.

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::time::Duration;

/// Minimum spacing between provider requests accepted by [`RequestPacer::paced`].
pub const MIN_PACING: Duration = Duration::from_millis(300);

/// Spaces out provider requests to at most one per interval, across tasks.
pub struct RequestPacer {
    limiter: Option<DefaultDirectRateLimiter>,
    interval: Duration,
}

impl std::fmt::Debug for RequestPacer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestPacer")
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

impl RequestPacer {
    /// Allow one request per `interval`, without bursts.
    ///
    /// A zero interval disables pacing.
    pub fn paced(interval: Duration) -> Self {
        Self {
            limiter: Quota::with_period(interval).map(RateLimiter::direct),
            interval,
        }
    }

    /// A pacer that never waits, used for offline sources.
    pub const fn unpaced() -> Self {
        Self {
            limiter: None,
            interval: Duration::ZERO,
        }
    }

    /// The configured spacing between requests.
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait until the next request slot is available.
    pub async fn wait(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}

impl Default for RequestPacer {
    fn default() -> Self {
        Self::paced(MIN_PACING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_unpaced_never_waits() {
        let pacer = RequestPacer::unpaced();
        let started = Instant::now();
        for _ in 0..5 {
            pacer.wait().await;
        }
        assert!(started.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_paced_spaces_requests() {
        let pacer = RequestPacer::paced(Duration::from_millis(40));
        let started = Instant::now();
        for _ in 0..3 {
            pacer.wait().await;
        }
        // First slot is free, the next two wait one interval each.
        assert!(started.elapsed() >= Duration::from_millis(75));
    }

    #[test]
    fn test_zero_interval_disables_pacing() {
        let pacer = RequestPacer::paced(Duration::ZERO);
        assert!(pacer.limiter.is_none());
        assert_eq!(pacer.interval(), Duration::ZERO);
    }
}
