//! Set-once upstream subscription cell.


use alloc::sync::Arc;
use core::sync::atomic::{Ordering, fence};

use portable_atomic::AtomicBool;
use spin::Once;

use super::{ProtocolViolation, Subscription};

const TARGET: &str = "fraktor::reactive::subscription";

/// Lock-free holder for an upstream [`Subscription`].
///
/// Only the first handle is honoured; later handles are cancelled on arrival. Cancelling the
/// cell cancels the stored handle, and any handle stored afterwards is cancelled immediately.
pub struct SubscriptionCell {
  slot:      Once<Arc<dyn Subscription>>,
  cancelled: AtomicBool,
}

impl SubscriptionCell {
  /// Creates an empty cell.
  #[must_use]
  pub const fn new() -> Self {
    Self { slot: Once::new(), cancelled: AtomicBool::new(false) }
  }

  /// Stores `subscription` if the cell is empty and not cancelled.
  ///
  /// Returns `true` when the handle was accepted. A rejected handle has already been cancelled.
  pub fn set(&self, subscription: Arc<dyn Subscription>) -> bool {
    let mut accepted = false;
    self.slot.call_once(|| {
      accepted = true;
      subscription.clone()
    });
    if !accepted {
      tracing::warn!(target: TARGET, "cancelling duplicate subscription");
      subscription.cancel();
      return false;
    }
    fence(Ordering::SeqCst);
    if self.cancelled.load(Ordering::SeqCst) {
      subscription.cancel();
      return false;
    }
    true
  }

  /// Returns the stored handle, if any.
  #[must_use]
  pub fn get(&self) -> Option<&Arc<dyn Subscription>> {
    self.slot.get()
  }

  /// Returns `true` once a handle has been stored.
  #[must_use]
  pub fn is_set(&self) -> bool {
    self.slot.is_completed()
  }

  /// Returns `true` once [`SubscriptionCell::cancel`] has been called.
  #[must_use]
  pub fn is_cancelled(&self) -> bool {
    self.cancelled.load(Ordering::Acquire)
  }

  /// Forwards a request to the stored handle.
  ///
  /// Requests on a cancelled cell are ignored.
  ///
  /// # Errors
  ///
  /// Returns [`ProtocolViolation::NonPositiveRequest`] when `amount` is zero and
  /// [`ProtocolViolation::RequestBeforeSubscribe`] when no handle has been stored yet.
  pub fn request(&self, amount: u64) -> Result<(), ProtocolViolation> {
    if amount == 0 {
      return Err(ProtocolViolation::NonPositiveRequest);
    }
    if self.is_cancelled() {
      return Ok(());
    }
    match self.slot.get() {
      | Some(subscription) => {
        subscription.request(amount);
        Ok(())
      },
      | None => Err(ProtocolViolation::RequestBeforeSubscribe),
    }
  }

  /// Cancels the stored handle. Returns `true` on the first call only.
  pub fn cancel(&self) -> bool {
    if self.cancelled.swap(true, Ordering::SeqCst) {
      return false;
    }
    fence(Ordering::SeqCst);
    if let Some(subscription) = self.slot.get() {
      subscription.cancel();
    }
    true
  }
}

impl Default for SubscriptionCell {
  fn default() -> Self {
    Self::new()
  }
}
