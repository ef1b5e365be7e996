
use core::sync::atomic::Ordering;

use portable_atomic::AtomicU8;

/// State of a skip-until gate.
///
/// A gate starts [`GateState::Closed`] and moves to [`GateState::Open`] at most once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum GateState {
  /// Main items are discarded.
  Closed = 0,
  /// Main items pass through.
  Open   = 1,
}

impl GateState {
  /// Returns the raw representation.
  #[must_use]
  pub const fn as_u8(self) -> u8 {
    self as u8
  }

  /// Decodes a raw representation. Any non-zero value is treated as open.
  #[must_use]
  pub const fn from_u8(value: u8) -> Self {
    match value {
      | 0 => Self::Closed,
      | _ => Self::Open,
    }
  }

  /// Reads the state stored in `atomic`.
  #[must_use]
  pub fn load(atomic: &AtomicU8) -> Self {
    Self::from_u8(atomic.load(Ordering::Acquire))
  }

  /// Attempts the `expected -> desired` transition.
  ///
  /// # Errors
  ///
  /// Returns the observed state when it differs from `expected`.
  pub fn compare_exchange(expected: Self, desired: Self, atomic: &AtomicU8) -> Result<Self, Self> {
    atomic
      .compare_exchange(expected.as_u8(), desired.as_u8(), Ordering::AcqRel, Ordering::Acquire)
      .map(Self::from_u8)
      .map_err(Self::from_u8)
  }
}
