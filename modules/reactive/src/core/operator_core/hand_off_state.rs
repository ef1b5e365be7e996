use core::sync::atomic::Ordering;

use portable_atomic::AtomicU8;

/// Progress of the downstream `on_subscribe` hand-off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub(super) enum HandOffState {
  Pending    = 0,
  InProgress = 1,
  Done       = 2,
}

impl HandOffState {
  const fn from_u8(value: u8) -> Self {
    match value {
      | 0 => Self::Pending,
      | 1 => Self::InProgress,
      | _ => Self::Done,
    }
  }

  pub(super) fn load(atomic: &AtomicU8) -> Self {
    Self::from_u8(atomic.load(Ordering::Acquire))
  }

  pub(super) fn store(self, atomic: &AtomicU8) {
    atomic.store(self as u8, Ordering::Release);
  }

  pub(super) fn compare_exchange(expected: Self, desired: Self, atomic: &AtomicU8) -> Result<Self, Self> {
    atomic
      .compare_exchange(expected as u8, desired as u8, Ordering::AcqRel, Ordering::Acquire)
      .map(Self::from_u8)
      .map_err(Self::from_u8)
  }
}
