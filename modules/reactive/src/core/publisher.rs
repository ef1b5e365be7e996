use alloc::sync::Arc;

use super::Subscriber;

/// Source of a sequence of signals.
///
/// Implementations must call [`Subscriber::on_subscribe`] before any other signal and must not
/// emit more items than were requested. Subscribing may start work eagerly or lazily.
pub trait Publisher<T>: Send + Sync {
  /// Attaches `subscriber` to this publisher.
  fn subscribe(&self, subscriber: Arc<dyn Subscriber<T>>);
}

impl<T, P> Publisher<T> for Arc<P>
where
  P: Publisher<T> + ?Sized,
{
  fn subscribe(&self, subscriber: Arc<dyn Subscriber<T>>) {
    (**self).subscribe(subscriber);
  }
}
