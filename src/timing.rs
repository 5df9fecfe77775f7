//! Courtesy-delay primitives
//!
//! All deliberate pauses (between page fetches and before each download) go
//! through the [`Sleeper`] trait so tests can run the pipeline without real
//! waits and can assert exactly when a pause would have happened.

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

/// Injectable sleep capability
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Production sleeper backed by the tokio timer
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that returns immediately; used by tests and dry runs
pub struct NoSleep;

#[async_trait]
impl Sleeper for NoSleep {
    async fn sleep(&self, _duration: Duration) {}
}

/// An inclusive range of durations to pause between outbound requests
#[derive(Debug, Clone, Copy)]
pub struct DelayRange {
    min: Duration,
    max: Duration,
}

impl DelayRange {
    /// Creates a delay range; if the bounds are inverted they are swapped
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Convenience constructor from millisecond bounds
    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self::new(Duration::from_millis(min_ms), Duration::from_millis(max_ms))
    }

    /// Samples a uniformly random duration within the range
    pub fn sample(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}
