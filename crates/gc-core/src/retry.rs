//! Retry policy values.
//!
//! Attempt count and back-off are injected rather than hard-coded so tests
//! can run with a zero-delay policy.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Backoff {
    None,
    /// Same delay before every retry.
    Fixed(Duration),
    /// `delay * attempt` before retry number `attempt`.
    Linear(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Never below 1.
    pub max_attempts: u32,
    pub backoff: Backoff,
}

impl RetryPolicy {
    pub const CLINICAL_FACTORS_ATTEMPTS: u32 = 3;
    pub const CLINICAL_FACTORS_DELAY: Duration = Duration::from_millis(500);

    pub fn new(max_attempts: u32, backoff: Backoff) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// 3 attempts, 500 ms apart.
    pub fn clinical_factors() -> Self {
        Self::new(
            Self::CLINICAL_FACTORS_ATTEMPTS,
            Backoff::Fixed(Self::CLINICAL_FACTORS_DELAY),
        )
    }

    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Backoff::None)
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::None => Duration::ZERO,
            Backoff::Fixed(delay) => delay,
            Backoff::Linear(delay) => delay * attempt,
        }
    }

    pub fn has_attempts_left(&self, attempts_made: u32) -> bool {
        attempts_made < self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::clinical_factors()
    }
}
