//! Retry policy for job-board fetches.
//!
//! Every request gets a fixed number of attempts. A 403 means the board is
//! actively blocking us, so the next attempt waits out a long randomized
//! cooldown first; any other failure only gets the short randomized jitter
//! that separates consecutive attempts, which keeps concurrent keyword
//! tasks from retrying in lockstep.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::error::ScraperError;

/// Inclusive range of milliseconds a randomized sleep is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    pub const ZERO: DelayRange = DelayRange::new(0, 0);

    #[must_use]
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// Draws a uniformly random duration from the range.
    #[must_use]
    pub fn sample(&self) -> Duration {
        let ms = if self.max_ms <= self.min_ms {
            self.min_ms
        } else {
            rand::rng().random_range(self.min_ms..=self.max_ms)
        };
        Duration::from_millis(ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per request, including the first.
    pub max_attempts: u32,
    /// Sleep between consecutive attempts.
    pub jitter: DelayRange,
    /// Extra sleep after a 403, before the jitter.
    pub blocked_cooldown: DelayRange,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            jitter: DelayRange::new(1_000, 3_000),
            blocked_cooldown: DelayRange::new(5_000, 10_000),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn from_app_config(config: &jobscout_core::AppConfig) -> Self {
        Self {
            max_attempts: config.scraper_max_attempts.max(1),
            jitter: DelayRange::new(config.scraper_jitter_min_ms, config.scraper_jitter_max_ms),
            blocked_cooldown: DelayRange::new(
                config.scraper_blocked_cooldown_min_ms,
                config.scraper_blocked_cooldown_max_ms,
            ),
        }
    }

    /// A policy with no sleeps at all, for tests and local fixtures.
    #[must_use]
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            jitter: DelayRange::ZERO,
            blocked_cooldown: DelayRange::ZERO,
        }
    }
}

/// Returns `true` if another attempt could plausibly succeed.
///
/// A malformed request URL will fail the same way every time.
fn is_retriable(err: &ScraperError) -> bool {
    !matches!(err, ScraperError::InvalidUrl { .. } | ScraperError::Parse(_))
}

/// Runs `operation` up to `policy.max_attempts` times.
///
/// The first success is returned immediately. After a failed attempt that
/// is not the last, sleeps for the blocked cooldown (403 only) and then the
/// jitter before trying again. When attempts run out, the last error is
/// returned. `target` is only used for logging.
pub(crate) async fn retry_with_jitter<T, F, Fut>(
    policy: &RetryPolicy,
    target: &str,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if !is_retriable(&err) || attempt >= max_attempts {
            tracing::warn!(
                target_url = target,
                attempt,
                max_attempts,
                error = %err,
                "giving up on request"
            );
            return Err(err);
        }

        if matches!(err, ScraperError::Blocked { .. }) {
            let cooldown = policy.blocked_cooldown.sample();
            tracing::warn!(
                target_url = target,
                attempt,
                ?cooldown,
                "blocked by upstream; cooling down before retry"
            );
            tokio::time::sleep(cooldown).await;
        } else {
            tracing::warn!(
                target_url = target,
                attempt,
                max_attempts,
                error = %err,
                "request failed; retrying"
            );
        }

        tokio::time::sleep(policy.jitter.sample()).await;
        attempt += 1;
    }
}
