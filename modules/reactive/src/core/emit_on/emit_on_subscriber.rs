use alloc::{
  boxed::Box,
  collections::VecDeque,
  sync::{Arc, Weak},
};
use core::sync::atomic::Ordering;

use portable_atomic::AtomicUsize;
use spin::Mutex;

use crate::core::{Executor, OperatorCore, Signal, Subscriber, Subscription};

const TARGET: &str = "fraktor::reactive::emit_on";

pub(super) struct EmitOnSubscriber<T> {
  me:       Weak<Self>,
  core:     OperatorCore<T>,
  executor: Arc<dyn Executor>,
  queue:    Mutex<VecDeque<Signal<T>>>,
  wip:      AtomicUsize,
}

impl<T: Send + 'static> EmitOnSubscriber<T> {
  pub(super) fn new(downstream: Arc<dyn Subscriber<T>>, executor: Arc<dyn Executor>) -> Arc<Self> {
    Arc::new_cyclic(|me| Self {
      me: me.clone(),
      core: OperatorCore::new(downstream),
      executor,
      queue: Mutex::new(VecDeque::new()),
      wip: AtomicUsize::new(0),
    })
  }

  fn schedule(&self) {
    if self.wip.fetch_add(1, Ordering::AcqRel) != 0 {
      return;
    }
    match self.me.upgrade() {
      | Some(me) => self.executor.execute(Box::new(move || me.drain())),
      | None => tracing::trace!(target: TARGET, "subscriber dropped before scheduling"),
    }
  }

  fn drain(&self) {
    let mut missed = 1;
    loop {
      loop {
        let next = self.queue.lock().pop_front();
        let Some(signal) = next else {
          break;
        };
        self.core.deliver(signal);
      }
      missed = self.wip.fetch_sub(missed, Ordering::AcqRel) - missed;
      if missed == 0 {
        return;
      }
    }
  }
}

impl<T: Send + 'static> Subscriber<T> for EmitOnSubscriber<T> {
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
      return;
    }
    if self.core.is_terminated() {
      tracing::trace!(target: TARGET, "dropping signal after termination");
      return;
    }
    self.queue.lock().push_back(signal);
    self.schedule();
  }
}

impl<T: Send + 'static> Subscription for EmitOnSubscriber<T> {
  fn request(&self, amount: u64) {
    self.core.request(amount);
  }

  fn cancel(&self) {
    self.core.cancel();
    self.queue.lock().clear();
  }
}
