//! Atomic outstanding-request counter.

#[cfg(test)]
mod tests;

use core::sync::atomic::Ordering;

use portable_atomic::AtomicU64;

use crate::core::demand::Demand;

/// Tracks outstanding downstream demand shared between threads.
///
/// Additions saturate at [`Demand::Unbounded`]; once unbounded the counter never decreases.
#[derive(Debug)]
pub struct DemandCounter {
  outstanding: AtomicU64,
}

impl DemandCounter {
  /// Creates a counter with zero demand.
  #[must_use]
  pub const fn new() -> Self {
    Self { outstanding: AtomicU64::new(0) }
  }

  /// Returns the current demand value.
  #[must_use]
  pub fn current(&self) -> Demand {
    Demand::from_raw(self.outstanding.load(Ordering::Acquire))
  }

  /// Adds demand and returns the demand observed before the addition.
  pub fn add(&self, amount: u64) -> Demand {
    let mut current = self.outstanding.load(Ordering::Acquire);
    loop {
      if current == u64::MAX {
        return Demand::Unbounded;
      }
      let next = current.saturating_add(amount);
      match self.outstanding.compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire) {
        | Ok(previous) => return Demand::from_raw(previous),
        | Err(actual) => current = actual,
      }
    }
  }

  /// Records `amount` delivered items and returns the remaining demand.
  ///
  /// Unbounded demand is left untouched.
  pub fn produced(&self, amount: u64) -> Demand {
    let mut current = self.outstanding.load(Ordering::Acquire);
    loop {
      if current == u64::MAX {
        return Demand::Unbounded;
      }
      let next = current.saturating_sub(amount);
      match self.outstanding.compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire) {
        | Ok(_) => return Demand::Finite(next),
        | Err(actual) => current = actual,
      }
    }
  }
}

impl Default for DemandCounter {
  fn default() -> Self {
    Self::new()
  }
}
