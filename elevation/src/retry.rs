use crate::ProviderError;
use log::warn;
use std::{thread, time::Duration};

/// Bounded exponential backoff for rate-limited requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,

    /// Delay after the first rate-limited attempt.
    pub initial_backoff: Duration,

    /// Upper bound for any single delay.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 8,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// A single attempt and no waiting.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    #[must_use]
    pub fn with_backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.initial_backoff = initial;
        self.max_backoff = max.max(initial);
        self
    }

    /// Delay to wait after the `attempt`th (1-based) rate-limited
    /// attempt.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2_u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }

    /// Runs `request` until it yields something other than
    /// [`Attempt::RateLimited`], sleeping between attempts.
    pub(crate) fn run<T, F>(&self, mut request: F) -> Result<T, ProviderError>
    where
        F: FnMut() -> Result<Attempt<T>, ProviderError>,
    {
        let max_attempts = self.max_attempts.max(1);
        for attempt in 1..=max_attempts {
            match request()? {
                Attempt::Ready(value) => return Ok(value),
                Attempt::RateLimited if attempt < max_attempts => {
                    let delay = self.backoff(attempt);
                    warn!("rate limited; attempt: {attempt}/{max_attempts}, retry in: {delay:?}");
                    thread::sleep(delay);
                }
                Attempt::RateLimited => {}
            }
        }
        Err(ProviderError::RateLimited {
            attempts: max_attempts,
        })
    }
}

/// Result of one request attempt.
pub(crate) enum Attempt<T> {
    Ready(T),
    RateLimited,
}

#[cfg(test)]
mod tests {
    use super::{Attempt, ProviderError, RetryPolicy};
    use std::time::Duration;

    fn fast(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::none().with_max_attempts(max_attempts)
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy::default()
            .with_backoff(Duration::from_millis(100), Duration::from_millis(350));
        assert_eq!(policy.backoff(1), Duration::from_millis(100));
        assert_eq!(policy.backoff(2), Duration::from_millis(200));
        assert_eq!(policy.backoff(3), Duration::from_millis(350));
        assert_eq!(policy.backoff(40), Duration::from_millis(350));
    }

    #[test]
    fn test_retries_until_ready() {
        let mut calls = 0;
        let value = fast(5)
            .run(|| {
                calls += 1;
                Ok(if calls < 3 {
                    Attempt::RateLimited
                } else {
                    Attempt::Ready(42)
                })
            })
            .unwrap();
        assert_eq!(value, 42);
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_gives_up_after_max_attempts() {
        let mut calls = 0;
        let res: Result<(), _> = fast(4).run(|| {
            calls += 1;
            Ok(Attempt::RateLimited)
        });
        assert!(matches!(res, Err(ProviderError::RateLimited { attempts: 4 })));
        assert_eq!(calls, 4);
    }

    #[test]
    fn test_hard_errors_are_not_retried() {
        let mut calls = 0;
        let res: Result<(), _> = fast(4).run(|| {
            calls += 1;
            Err(ProviderError::NoData)
        });
        assert!(matches!(res, Err(ProviderError::NoData)));
        assert_eq!(calls, 1);
    }
}
