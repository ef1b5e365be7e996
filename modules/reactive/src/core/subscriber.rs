use alloc::sync::Arc;

use super::{Signal, StreamError, Subscription};

/// Receiver of a sequence of signals.
///
/// A subscriber receives `on_subscribe` exactly once, then zero or more items and at most one
/// terminal signal. Signals are never delivered concurrently to the same subscriber.
pub trait Subscriber<T>: Send + Sync {
  /// Hands the flow-control handle to the subscriber.
  fn on_subscribe(&self, subscription: Arc<dyn Subscription>);

  /// Delivers an item or terminal signal.
  fn on_signal(&self, signal: Signal<T>);

  /// Delivers an item.
  fn on_next(&self, item: T) {
    self.on_signal(Signal::Item(item));
  }

  /// Delivers a terminal failure.
  fn on_error(&self, error: StreamError) {
    self.on_signal(Signal::Failure(error));
  }

  /// Delivers terminal completion.
  fn on_complete(&self) {
    self.on_signal(Signal::Completion);
  }
}
