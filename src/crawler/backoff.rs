//! Exponential backoff policy for HTTP retries
//!
//! The policy is a plain value: it computes waits but never sleeps, so the
//! schedule can be checked without a network or a clock.

use crate::config::FetchConfig;
use std::time::Duration;

/// Retry budget and wait schedule for a single URL
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffPolicy {
    initial_delay: Duration,
    multiplier: f64,
    max_delay: Duration,
    max_attempts: u32,
}

impl BackoffPolicy {
    /// Creates a policy
    ///
    /// `max_attempts` counts every request including the first and is
    /// raised to at least 1. A multiplier below 1.0 is treated as 1.0.
    pub fn new(
        initial_delay: Duration,
        multiplier: f64,
        max_delay: Duration,
        max_attempts: u32,
    ) -> Self {
        let multiplier = if multiplier.is_finite() && multiplier >= 1.0 {
            multiplier
        } else {
            1.0
        };

        Self {
            initial_delay,
            multiplier,
            max_delay,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Builds the policy described by the `[fetch]` config section
    pub fn from_config(config: &FetchConfig) -> Self {
        Self::new(
            Duration::from_millis(config.initial_delay_ms),
            config.backoff_multiplier,
            Duration::from_millis(config.max_delay_ms),
            config.max_attempts,
        )
    }

    /// A policy that never retries
    pub fn no_retry() -> Self {
        Self::new(Duration::ZERO, 1.0, Duration::ZERO, 1)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns true if another attempt is allowed after `attempt` failed
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Wait after failed attempt number `attempt` (1-based)
    ///
    /// `initial_delay * multiplier^(attempt - 1)`, capped at `max_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let factor = self.multiplier.powi(exponent);
        let secs = self.initial_delay.as_secs_f64() * factor;

        if !secs.is_finite() || secs >= self.max_delay.as_secs_f64() {
            return self.max_delay;
        }

        Duration::from_secs_f64(secs).min(self.max_delay)
    }

    /// Waits for attempts `1..=max_attempts`
    ///
    /// The last entry is never slept: once the final attempt fails the
    /// fetcher surfaces the error instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use quote_scout::crawler::BackoffPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = BackoffPolicy::new(
    ///     Duration::from_secs(2),
    ///     2.0,
    ///     Duration::from_secs(10),
    ///     5,
    /// );
    /// let secs: Vec<u64> = policy.schedule().iter().map(|d| d.as_secs()).collect();
    /// assert_eq!(secs, vec![2, 4, 8, 10, 10]);
    /// ```
    pub fn schedule(&self) -> Vec<Duration> {
        (1..=self.max_attempts).map(|a| self.delay_for(a)).collect()
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::from_config(&FetchConfig::default())
    }
}
