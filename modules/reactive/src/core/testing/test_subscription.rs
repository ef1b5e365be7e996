use core::sync::atomic::Ordering;

use portable_atomic::{AtomicU64, AtomicUsize};

use crate::core::Subscription;

/// Subscription that records every request and cancellation it receives.
#[derive(Debug, Default)]
pub struct TestSubscription {
  requested:     AtomicU64,
  request_calls: AtomicUsize,
  cancel_calls:  AtomicUsize,
  zero_requests: AtomicUsize,
}

impl TestSubscription {
  /// Creates a fresh recording subscription.
  #[must_use]
  pub const fn new() -> Self {
    Self {
      requested:     AtomicU64::new(0),
      request_calls: AtomicUsize::new(0),
      cancel_calls:  AtomicUsize::new(0),
      zero_requests: AtomicUsize::new(0),
    }
  }

  /// Returns the total requested amount, saturating at `u64::MAX`.
  #[must_use]
  pub fn requested(&self) -> u64 {
    self.requested.load(Ordering::Acquire)
  }

  /// Returns how many times `request` was called.
  #[must_use]
  pub fn request_calls(&self) -> usize {
    self.request_calls.load(Ordering::Acquire)
  }

  /// Returns `true` once `cancel` has been called.
  #[must_use]
  pub fn is_cancelled(&self) -> bool {
    self.cancel_calls() > 0
  }

  /// Returns how many times `cancel` was called.
  #[must_use]
  pub fn cancel_calls(&self) -> usize {
    self.cancel_calls.load(Ordering::Acquire)
  }

  /// Returns how many `request(0)` calls were observed.
  #[must_use]
  pub fn zero_requests(&self) -> usize {
    self.zero_requests.load(Ordering::Acquire)
  }
}

impl Subscription for TestSubscription {
  fn request(&self, amount: u64) {
    self.request_calls.fetch_add(1, Ordering::AcqRel);
    if amount == 0 {
      self.zero_requests.fetch_add(1, Ordering::AcqRel);
      return;
    }
    let mut current = self.requested.load(Ordering::Acquire);
    loop {
      let next = current.saturating_add(amount);
      match self.requested.compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire) {
        | Ok(_) => return,
        | Err(actual) => current = actual,
      }
    }
  }

  fn cancel(&self) {
    self.cancel_calls.fetch_add(1, Ordering::AcqRel);
  }
}
