use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::time::Duration;

/// Throttle applied by the batch orchestrator before each group of calls
#[async_trait]
pub trait BatchPacer: Send + Sync {
    /// Wait until the group `batch_index` of `batch_len` calls may be dispatched
    async fn before_batch(&self, batch_index: usize, batch_len: usize);
}

/// Sleeps a fixed delay between groups, never before the first one
pub struct FixedDelayPacer {
    delay: Duration,
}

impl FixedDelayPacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl BatchPacer for FixedDelayPacer {
    async fn before_batch(&self, batch_index: usize, _batch_len: usize) {
        if batch_index == 0 || self.delay.is_zero() {
            return;
        }
        tracing::debug!("Pacing: waiting {:?} before batch {}", self.delay, batch_index + 1);
        tokio::time::sleep(self.delay).await;
    }
}

/// Dispatches immediately
pub struct NoDelayPacer;

#[async_trait]
impl BatchPacer for NoDelayPacer {
    async fn before_batch(&self, _batch_index: usize, _batch_len: usize) {}
}

/// Token bucket shared by every batch that goes through the same service.
///
/// One cell is spent per outbound call; a group waits until it can take
/// `batch_len` cells (capped at the burst capacity).
pub struct TokenBucketPacer {
    capacity: NonZeroU32,
    limiter: DefaultDirectRateLimiter,
}

impl TokenBucketPacer {
    pub fn new(capacity: NonZeroU32, refill_per_sec: NonZeroU32) -> Self {
        let quota = Quota::per_second(refill_per_sec).allow_burst(capacity);
        Self {
            capacity,
            limiter: RateLimiter::direct(quota),
        }
    }
}

#[async_trait]
impl BatchPacer for TokenBucketPacer {
    async fn before_batch(&self, batch_index: usize, batch_len: usize) {
        let wanted = u32::try_from(batch_len).unwrap_or(u32::MAX);
        let Some(cells) = NonZeroU32::new(wanted.min(self.capacity.get())) else {
            return;
        };
        tracing::debug!("Rate limiting: reserving {} calls for batch {}", cells, batch_index + 1);
        if let Err(e) = self.limiter.until_n_ready(cells).await {
            // Unreachable while cells <= capacity; fall back to a single cell
            tracing::warn!("Rate limiter rejected batch {}: {}", batch_index + 1, e);
            self.limiter.until_ready().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn nz(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[tokio::test]
    async fn test_fixed_delay_skips_first_batch() {
        let pacer = FixedDelayPacer::new(Duration::from_millis(100));

        let start = Instant::now();
        pacer.before_batch(0, 5).await;
        assert!(start.elapsed() < Duration::from_millis(50));

        let start = Instant::now();
        pacer.before_batch(1, 5).await;
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_token_bucket_waits_when_drained() {
        let pacer = TokenBucketPacer::new(nz(5), nz(50));

        let start = Instant::now();
        pacer.before_batch(0, 5).await;
        assert!(start.elapsed() < Duration::from_millis(50));

        // Bucket is empty; five tokens at 50/s take about 100ms
        let start = Instant::now();
        pacer.before_batch(1, 5).await;
        assert!(start.elapsed() >= Duration::from_millis(80));
    }

    #[tokio::test]
    async fn test_token_bucket_caps_request_at_capacity() {
        let pacer = TokenBucketPacer::new(nz(2), nz(1000));
        let start = Instant::now();
        pacer.before_batch(0, 10).await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_token_bucket_slowest_rate_waits_without_overflow() {
        let pacer = TokenBucketPacer::new(nz(5), nz(1));
        pacer.before_batch(0, 5).await;

        // Drained at one call per second: the next single call is about a second away
        let start = Instant::now();
        let waited = tokio::time::timeout(Duration::from_secs(3), pacer.before_batch(1, 1)).await;
        assert!(waited.is_ok());
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_token_bucket_empty_batch_is_free() {
        let pacer = TokenBucketPacer::new(nz(1), nz(1));
        pacer.before_batch(0, 1).await;

        let start = Instant::now();
        pacer.before_batch(1, 0).await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
