//! Retry policy for upstream calls
//!
//! Exponential backoff with a fixed multiplier and no jitter. The policy is
//! an explicit value injected into the generation client so tests can shrink
//! the delays instead of sleeping in real time.

use std::time::Duration;

/// Bounded-retry policy: `max_attempts` total attempts, waiting
/// `base_delay * 2^attempt` between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles each retry
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Delay to wait after the given zero-based attempt index
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }

    /// Whether the given zero-based attempt index is the last one allowed
    pub fn is_final(&self, attempt: u32) -> bool {
        attempt + 1 >= self.max_attempts
    }
}
