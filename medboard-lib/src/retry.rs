//! Backoff policy for transient backend failures

use std::time::Duration;

/// A class of failure the backend may recover from.
///
/// Every other error status (400, 401, 404, ...) is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransientFailure {
    /// HTTP 429.
    RateLimited,
    /// HTTP 5xx.
    Server,
    /// Connection failure or request timeout.
    Network,
}

/// How many times a request is resent and how long to wait in between.
///
/// The wait starts at `initial_delay` and doubles up to `max_delay`. A rate
/// limited response waits for the server's `Retry-After` instead when it
/// sends one.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use medboard_lib::retry::{RetryConfig, TransientFailure};
///
/// let config = RetryConfig::default()
///     .with_initial_delay(Duration::from_millis(200))
///     .without(TransientFailure::Server);
/// assert!(config.retries(TransientFailure::Network));
/// assert!(!config.retries(TransientFailure::Server));
/// assert!(!RetryConfig::no_retry().retries(TransientFailure::Network));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    disabled: Vec<TransientFailure>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            disabled: Vec::new(),
        }
    }
}

impl RetryConfig {
    /// Every failure is returned on the first attempt.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Stops retrying one failure class.
    pub fn without(mut self, failure: TransientFailure) -> Self {
        if !self.disabled.contains(&failure) {
            self.disabled.push(failure);
        }
        self
    }

    /// Whether `failure` is retried at all.
    pub fn retries(&self, failure: TransientFailure) -> bool {
        self.max_retries > 0 && !self.disabled.contains(&failure)
    }

    /// Fresh retry state for one request.
    pub(crate) fn backoff(&self) -> Backoff<'_> {
        Backoff {
            config: self,
            attempts: 0,
            delay: self.initial_delay,
        }
    }
}

/// Retry state of a single request.
#[derive(Debug)]
pub(crate) struct Backoff<'a> {
    config: &'a RetryConfig,
    attempts: u32,
    delay: Duration,
}

impl Backoff<'_> {
    /// Returns the wait before resending, or `None` once `failure` is final.
    ///
    /// A server-sent `retry_after` is used as is and leaves the doubling
    /// schedule where it was.
    pub(crate) fn next(
        &mut self,
        failure: TransientFailure,
        retry_after: Option<Duration>,
    ) -> Option<Duration> {
        if !self.config.retries(failure) || self.attempts >= self.config.max_retries {
            return None;
        }
        self.attempts += 1;

        if let Some(wait) = retry_after {
            return Some(wait);
        }
        let wait = self.delay;
        self.delay = (self.delay * 2).min(self.config.max_delay);
        Some(wait)
    }
}
