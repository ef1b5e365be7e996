/// Flow-control handle held by a [`Subscriber`](super::Subscriber).
///
/// Both operations may be invoked from any thread, at any time, any number of times.
pub trait Subscription: Send + Sync {
  /// Requests `amount` additional items.
  ///
  /// `amount` must be greater than zero. `u64::MAX` requests an unbounded number of items and
  /// cumulative demand saturates there instead of overflowing.
  fn request(&self, amount: u64);

  /// Cancels the subscription. Only the first call has an effect.
  fn cancel(&self);
}
