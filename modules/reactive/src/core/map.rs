//! Item transforming operator.

mod map_subscriber;
#[cfg(test)]
mod tests;

use alloc::sync::Arc;

use map_subscriber::MapSubscriber;

use super::{Publisher, SerializedSubscriber, StreamError, Subscriber};

type Mapper<I, O> = dyn Fn(I) -> Result<O, StreamError> + Send + Sync;

/// Publisher applying a transformation to every upstream item.
///
/// A transformation returning `Err` cancels the upstream and fails the downstream once. The
/// downstream is serialized, so a `request(0)` from another thread never overlaps an item.
pub struct Map<I, O> {
  upstream: Arc<dyn Publisher<I>>,
  mapper:   Arc<Mapper<I, O>>,
}

impl<I, O> Map<I, O>
where
  I: Send + 'static,
  O: Send + 'static,
{
  /// Creates an infallible transformation.
  #[must_use]
  pub fn new<F>(upstream: Arc<dyn Publisher<I>>, mapper: F) -> Self
  where
    F: Fn(I) -> O + Send + Sync + 'static, {
    Self { upstream, mapper: Arc::new(move |item| Ok::<O, StreamError>(mapper(item))) }
  }

  /// Creates a fallible transformation.
  #[must_use]
  pub fn try_new<F>(upstream: Arc<dyn Publisher<I>>, mapper: F) -> Self
  where
    F: Fn(I) -> Result<O, StreamError> + Send + Sync + 'static, {
    Self { upstream, mapper: Arc::new(mapper) }
  }
}

impl<I, O> Publisher<O> for Map<I, O>
where
  I: Send + 'static,
  O: Send + 'static,
{
  fn subscribe(&self, subscriber: Arc<dyn Subscriber<O>>) {
    let serialized: Arc<dyn Subscriber<O>> = Arc::new(SerializedSubscriber::new(subscriber));
    self.upstream.subscribe(MapSubscriber::new(serialized, self.mapper.clone()));
  }
}
