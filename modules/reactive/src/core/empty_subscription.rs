use alloc::sync::Arc;

use super::{StreamError, Subscriber, Subscription};

/// Subscription that ignores every request and cancellation.
///
/// Used when a subscriber has to observe a terminal signal without ever being attached to a
/// live upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySubscription;

impl EmptySubscription {
  /// Completes `subscriber` immediately.
  pub fn complete<T>(subscriber: &dyn Subscriber<T>) {
    subscriber.on_subscribe(Arc::new(EmptySubscription));
    subscriber.on_complete();
  }

  /// Fails `subscriber` immediately with `error`.
  pub fn fail<T>(subscriber: &dyn Subscriber<T>, error: StreamError) {
    subscriber.on_subscribe(Arc::new(EmptySubscription));
    subscriber.on_error(error);
  }
}

impl Subscription for EmptySubscription {
  fn request(&self, _amount: u64) {}

  fn cancel(&self) {}
}
