//! `AniList` request rate limiter.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Default minimum interval between dispatches (~85 req/min).
///
/// `AniList` allows roughly 90 requests per minute per client.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(700);

/// Rate limiter handle shared between clients.
pub type SharedRateLimiter = Arc<Mutex<RateLimiter>>;

/// Single-tier rate limiter enforcing a minimum spacing between dispatches.
///
/// The interval is measured between dispatch starts: the timestamp is
/// recorded after any required sleep, right before the request goes out.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct RateLimiter {
    /// Minimum interval between dispatches.
    min_interval: Duration,
    /// Last dispatch timestamp.
    last_request: Option<Instant>,
}

impl RateLimiter {
    /// Creates a new rate limiter with the given minimum interval.
    #[must_use]
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: None,
        }
    }

    /// Creates a new rate limiter with the default interval (700ms).
    #[must_use]
    pub const fn default_interval() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }

    /// Wraps the limiter for sharing between clients.
    #[must_use]
    pub fn shared(self) -> SharedRateLimiter {
        Arc::new(Mutex::new(self))
    }

    /// Returns the configured minimum interval.
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits until the next dispatch is allowed, then records it.
    pub async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let delay = self.min_interval.saturating_sub(elapsed);
                tracing::debug!(
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "Rate limiting: waiting"
                );
                tokio::time::sleep(delay).await;
            }
        }

        self.last_request = Some(Instant::now());
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::default_interval()
    }
}
