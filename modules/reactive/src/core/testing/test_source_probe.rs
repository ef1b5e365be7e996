use alloc::sync::Arc;

use spin::Mutex;

use super::TestSubscription;
use crate::core::{Publisher, StreamError, Subscriber};

/// Manually driven publisher.
///
/// Tests push signals with [`emit`](Self::emit), [`fail`](Self::fail) and
/// [`complete`](Self::complete), and inspect the demand and cancellation the probe received.
/// Emission ignores demand so tests can provoke protocol edge cases; a probe serves one
/// subscriber at a time.
pub struct TestSourceProbe<T> {
  subscriber:   Mutex<Option<Arc<dyn Subscriber<T>>>>,
  subscription: Mutex<Arc<TestSubscription>>,
  subscribes:   Mutex<usize>,
}

impl<T: Send + 'static> TestSourceProbe<T> {
  /// Creates a probe without subscriber.
  #[must_use]
  pub fn new() -> Arc<Self> {
    Arc::new(Self {
      subscriber:   Mutex::new(None),
      subscription: Mutex::new(Arc::new(TestSubscription::new())),
      subscribes:   Mutex::new(0),
    })
  }

  /// Emits an item to the current subscriber.
  pub fn emit(&self, item: T) {
    if let Some(subscriber) = self.current() {
      subscriber.on_next(item);
    }
  }

  /// Fails the current subscriber.
  pub fn fail(&self, error: StreamError) {
    if let Some(subscriber) = self.current() {
      subscriber.on_error(error);
    }
  }

  /// Completes the current subscriber.
  pub fn complete(&self) {
    if let Some(subscriber) = self.current() {
      subscriber.on_complete();
    }
  }

  /// Returns `true` once a subscriber is attached.
  #[must_use]
  pub fn has_subscriber(&self) -> bool {
    self.subscriber.lock().is_some()
  }

  /// Returns how many times the probe was subscribed.
  #[must_use]
  pub fn subscribe_count(&self) -> usize {
    *self.subscribes.lock()
  }

  /// Returns the subscription handed to the latest subscriber.
  #[must_use]
  pub fn subscription(&self) -> Arc<TestSubscription> {
    self.subscription.lock().clone()
  }

  /// Returns the total amount requested by the latest subscriber.
  #[must_use]
  pub fn requested(&self) -> u64 {
    self.subscription().requested()
  }

  /// Returns `true` once the latest subscriber cancelled.
  #[must_use]
  pub fn is_cancelled(&self) -> bool {
    self.subscription().is_cancelled()
  }

  fn current(&self) -> Option<Arc<dyn Subscriber<T>>> {
    self.subscriber.lock().clone()
  }
}

impl<T: Send + 'static> Publisher<T> for TestSourceProbe<T> {
  fn subscribe(&self, subscriber: Arc<dyn Subscriber<T>>) {
    let subscription = Arc::new(TestSubscription::new());
    *self.subscription.lock() = subscription.clone();
    *self.subscriber.lock() = Some(subscriber.clone());
    *self.subscribes.lock() += 1;
    subscriber.on_subscribe(subscription);
  }
}
