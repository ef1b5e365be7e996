use alloc::sync::Arc;
use core::sync::atomic::Ordering;

use portable_atomic::AtomicBool;

use crate::core::Subscription;

/// Handle given to the downstream in place of the upstream one.
///
/// Raises the shared flag before cancelling, so signals still queued in the serializer are
/// dropped instead of reaching a subscriber that already cancelled.
pub(super) struct CancelTrackingSubscription {
  inner:     Arc<dyn Subscription>,
  cancelled: Arc<AtomicBool>,
}

impl CancelTrackingSubscription {
  pub(super) const fn new(inner: Arc<dyn Subscription>, cancelled: Arc<AtomicBool>) -> Self {
    Self { inner, cancelled }
  }
}

impl Subscription for CancelTrackingSubscription {
  fn request(&self, amount: u64) {
    self.inner.request(amount);
  }

  fn cancel(&self) {
    self.cancelled.store(true, Ordering::Release);
    self.inner.cancel();
  }
}
