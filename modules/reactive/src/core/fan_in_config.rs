//! Fan-in configuration.

#[cfg(test)]
mod tests;

use super::{FailureMode, StreamError, validate_positive_argument};

const DEFAULT_CONCURRENCY: usize = 128;
const DEFAULT_PREFETCH: u64 = 128;

/// Configuration for [`FanIn`](super::FanIn).
///
/// `prefetch` is the number of items requested from each active participant up front;
/// `u64::MAX` requests unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanInConfig {
  concurrency:  usize,
  prefetch:     u64,
  failure_mode: FailureMode,
}

impl FanInConfig {
  /// Creates a configuration with the provided values.
  #[must_use]
  pub const fn new(concurrency: usize, prefetch: u64, failure_mode: FailureMode) -> Self {
    Self { concurrency, prefetch, failure_mode }
  }

  /// Returns the number of participants drained simultaneously.
  #[must_use]
  pub const fn concurrency(&self) -> usize {
    self.concurrency
  }

  /// Returns the per-participant request count.
  #[must_use]
  pub const fn prefetch(&self) -> u64 {
    self.prefetch
  }

  /// Returns the failure mode.
  #[must_use]
  pub const fn failure_mode(&self) -> FailureMode {
    self.failure_mode
  }

  /// Updates the concurrency limit.
  #[must_use]
  pub const fn with_concurrency(mut self, concurrency: usize) -> Self {
    self.concurrency = concurrency;
    self
  }

  /// Updates the per-participant request count.
  #[must_use]
  pub const fn with_prefetch(mut self, prefetch: u64) -> Self {
    self.prefetch = prefetch;
    self
  }

  /// Updates the failure mode.
  #[must_use]
  pub const fn with_failure_mode(mut self, failure_mode: FailureMode) -> Self {
    self.failure_mode = failure_mode;
    self
  }

  /// Checks that concurrency and prefetch are positive.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::InvalidArgument`] naming the offending field.
  pub fn validate(&self) -> Result<(), StreamError> {
    validate_positive_argument("concurrency", self.concurrency)?;
    validate_positive_argument("prefetch", self.prefetch)?;
    Ok(())
  }

  /// Number of consumed items after which a participant is requested again.
  pub(crate) const fn replenish_threshold(&self) -> u64 {
    if self.prefetch == u64::MAX {
      return u64::MAX;
    }
    let threshold = self.prefetch - (self.prefetch >> 2);
    if threshold == 0 { 1 } else { threshold }
  }
}

impl Default for FanInConfig {
  fn default() -> Self {
    Self { concurrency: DEFAULT_CONCURRENCY, prefetch: DEFAULT_PREFETCH, failure_mode: FailureMode::FailFast }
  }
}
