use alloc::sync::{Arc, Weak};

use portable_atomic::AtomicU8;

use crate::core::{GateState, OperatorCore, Signal, StreamError, Subscriber, Subscription, SubscriptionCell};

const TARGET: &str = "fraktor::reactive::skip_until";

pub(super) struct SkipUntilMain<T> {
  me:    Weak<Self>,
  core:  OperatorCore<T>,
  gate:  AtomicU8,
  other: SubscriptionCell,
}

impl<T: Send + 'static> SkipUntilMain<T> {
  pub(super) fn new(downstream: Arc<dyn Subscriber<T>>) -> Arc<Self> {
    Arc::new_cyclic(|me| Self {
      me:    me.clone(),
      core:  OperatorCore::new(downstream),
      gate:  AtomicU8::new(GateState::Closed.as_u8()),
      other: SubscriptionCell::new(),
    })
  }

  pub(super) fn is_terminated(&self) -> bool {
    self.core.is_terminated()
  }

  pub(super) fn set_other_subscription(&self, subscription: Arc<dyn Subscription>) {
    if self.other.set(subscription.clone()) {
      subscription.request(1);
    }
  }

  pub(super) fn open(&self) {
    if GateState::compare_exchange(GateState::Closed, GateState::Open, &self.gate).is_ok() {
      tracing::debug!(target: TARGET, "gate opened");
      self.other.cancel();
    }
  }

  pub(super) fn other_failed(&self, error: StreamError) {
    if GateState::load(&self.gate) == GateState::Open {
      tracing::debug!(target: TARGET, %error, "ignoring secondary failure after the gate opened");
      return;
    }
    tracing::debug!(target: TARGET, %error, "secondary failed before the gate opened");
    self.other.cancel();
    self.core.fail_and_cancel(error);
  }
}

impl<T: Send + 'static> Subscriber<T> for SkipUntilMain<T> {
  fn on_subscribe(&self, subscription: Arc<dyn Subscription>) {
    match self.me.upgrade() {
      | Some(me) => {
        self.core.on_subscribe(subscription, me);
      },
      | None => subscription.cancel(),
    }
  }

  fn on_signal(&self, signal: Signal<T>) {
    if !self.core.ensure_subscribed() {
      self.other.cancel();
      return;
    }
    match signal {
      | Signal::Item(item) => match GateState::load(&self.gate) {
        | GateState::Open => self.core.emit(item),
        | GateState::Closed => {
          tracing::trace!(target: TARGET, "suppressing item while the gate is closed");
          if !self.core.is_terminated() {
            self.core.request(1);
          }
        },
      },
      | Signal::Failure(error) => {
        self.other.cancel();
        self.core.fail(error);
      },
      | Signal::Completion => {
        self.other.cancel();
        self.core.complete();
      },
    }
  }
}

impl<T: Send + 'static> Subscription for SkipUntilMain<T> {
  fn request(&self, amount: u64) {
    self.core.request(amount);
  }

  fn cancel(&self) {
    self.core.cancel();
    self.other.cancel();
  }
}
