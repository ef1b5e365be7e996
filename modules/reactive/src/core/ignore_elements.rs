//! Operator forwarding only the terminal signal.


use alloc::sync::{Arc, Weak};
use core::marker::PhantomData;

use super::{OperatorCore, ProtocolViolation, Publisher, SerializedSubscriber, Signal, Subscriber, Subscription};

/// Publisher that drops every upstream item and forwards the terminal signal.
///
/// The upstream is requested unbounded on subscription; downstream demand is validated but
/// otherwise irrelevant.
pub struct IgnoreElements<T> {
  upstream: Arc<dyn Publisher<T>>,
}

impl<T: Send + 'static> IgnoreElements<T> {
  /// Wraps `upstream`.
  #[must_use]
  pub fn new(upstream: Arc<dyn Publisher<T>>) -> Self {
    Self { upstream }
  }
}

impl<T: Send + 'static> Publisher<T> for IgnoreElements<T> {
  fn subscribe(&self, subscriber: Arc<dyn Subscriber<T>>) {
    let subscriber: Arc<dyn Subscriber<T>> = Arc::new(SerializedSubscriber::new(subscriber));
    let ignoring: Arc<IgnoreElementsSubscriber<T>> = Arc::new_cyclic(|me| IgnoreElementsSubscriber {
      me:    me.clone(),
      core:  OperatorCore::new(subscriber),
      _item: PhantomData,
    });
    self.upstream.subscribe(ignoring);
  }
}

struct IgnoreElementsSubscriber<T> {
  me:    Weak<Self>,
  core:  OperatorCore<T>,
  _item: PhantomData<fn(T)>,
}

impl<T: Send + 'static> Subscriber<T> for IgnoreElementsSubscriber<T> {
  fn on_subscribe(&self, subscription: Arc<dyn Subscription>) {
    let Some(me) = self.me.upgrade() else {
      subscription.cancel();
      return;
    };
    if self.core.on_subscribe(subscription, me) {
      self.core.request(u64::MAX);
    }
  }

  fn on_signal(&self, signal: Signal<T>) {
    if !self.core.ensure_subscribed() {
      return;
    }
    match signal {
      | Signal::Item(_) => {},
      | Signal::Failure(error) => self.core.fail(error),
      | Signal::Completion => self.core.complete(),
    }
  }
}

impl<T: Send + 'static> Subscription for IgnoreElementsSubscriber<T> {
  fn request(&self, amount: u64) {
    if amount == 0 {
      self.core.fail_and_cancel(ProtocolViolation::NonPositiveRequest.into());
    }
  }

  fn cancel(&self) {
    self.core.cancel();
  }
}
