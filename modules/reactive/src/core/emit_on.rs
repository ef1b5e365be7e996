//! Operator moving downstream delivery onto an executor.

mod emit_on_subscriber;

use alloc::sync::Arc;

use emit_on_subscriber::EmitOnSubscriber;

use super::{Executor, Publisher, SerializedSubscriber, Subscriber};

/// Publisher delivering upstream signals to the downstream through an [`Executor`].
///
/// The handshake happens on the subscribing thread. Items and the terminal signal are queued
/// and delivered by at most one executor task at a time, in upstream order.
pub struct EmitOn<T> {
  upstream: Arc<dyn Publisher<T>>,
  executor: Arc<dyn Executor>,
}

impl<T: Send + 'static> EmitOn<T> {
  /// Delivers the signals of `upstream` on `executor`.
  #[must_use]
  pub fn new(upstream: Arc<dyn Publisher<T>>, executor: Arc<dyn Executor>) -> Self {
    Self { upstream, executor }
  }
}

impl<T: Send + 'static> Publisher<T> for EmitOn<T> {
  fn subscribe(&self, subscriber: Arc<dyn Subscriber<T>>) {
    let serialized: Arc<dyn Subscriber<T>> = Arc::new(SerializedSubscriber::new(subscriber));
    self.upstream.subscribe(EmitOnSubscriber::new(serialized, self.executor.clone()));
  }
}
