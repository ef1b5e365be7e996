use alloc::sync::{Arc, Weak};

use super::Mapper;
use crate::core::{OperatorCore, Signal, Subscriber, Subscription};

pub(super) struct MapSubscriber<I, O> {
  me:     Weak<Self>,
  core:   OperatorCore<O>,
  mapper: Arc<Mapper<I, O>>,
}

impl<I, O> MapSubscriber<I, O>
where
  I: Send + 'static,
  O: Send + 'static,
{
  pub(super) fn new(downstream: Arc<dyn Subscriber<O>>, mapper: Arc<Mapper<I, O>>) -> Arc<Self> {
    Arc::new_cyclic(|me| Self { me: me.clone(), core: OperatorCore::new(downstream), mapper })
  }
}

impl<I, O> Subscriber<I> for MapSubscriber<I, O>
where
  I: Send + 'static,
  O: Send + 'static,
{
  fn on_subscribe(&self, subscription: Arc<dyn Subscription>) {
    match self.me.upgrade() {
      | Some(me) => {
        self.core.on_subscribe(subscription, me);
      },
      | None => subscription.cancel(),
    }
  }

  fn on_signal(&self, signal: Signal<I>) {
    if !self.core.ensure_subscribed() {
      return;
    }
    match signal {
      | Signal::Item(item) => {
        if self.core.is_terminated() {
          return;
        }
        match (self.mapper)(item) {
          | Ok(mapped) => self.core.emit(mapped),
          | Err(error) => self.core.fail_and_cancel(error),
        }
      },
      | Signal::Failure(error) => self.core.fail(error),
      | Signal::Completion => self.core.complete(),
    }
  }
}

impl<I, O> Subscription for MapSubscriber<I, O>
where
  I: Send + 'static,
  O: Send + 'static,
{
  fn request(&self, amount: u64) {
    self.core.request(amount);
  }

  fn cancel(&self) {
    self.core.cancel();
  }
}
