use alloc::{collections::VecDeque, sync::Arc};
use core::sync::atomic::Ordering;

use portable_atomic::{AtomicBool, AtomicU64};
use spin::Mutex;

use super::fan_in_coordinator::FanInCoordinator;
use crate::core::{FanInConfig, Signal, Subscriber, Subscription, SubscriptionCell};

/// Subscriber attached to one participant, buffering its items for the coordinator.
///
/// Holds its coordinator strongly; the coordinator drops its inners once it terminates.
pub(super) struct FanInInner<T> {
  parent:        Arc<FanInCoordinator<T>>,
  index:         usize,
  upstream:      SubscriptionCell,
  queue:         Mutex<VecDeque<T>>,
  terminal_seen: AtomicBool,
  done:          AtomicBool,
  consumed:      AtomicU64,
  prefetch:      u64,
  threshold:     u64,
}

impl<T: Send + 'static> FanInInner<T> {
  pub(super) fn new(parent: Arc<FanInCoordinator<T>>, index: usize, config: &FanInConfig) -> Self {
    Self {
      parent,
      index,
      upstream: SubscriptionCell::new(),
      queue: Mutex::new(VecDeque::new()),
      terminal_seen: AtomicBool::new(false),
      done: AtomicBool::new(false),
      consumed: AtomicU64::new(0),
      prefetch: config.prefetch(),
      threshold: config.replenish_threshold(),
    }
  }

  pub(super) const fn index(&self) -> usize {
    self.index
  }

  /// Takes the next buffered item, requesting more from the participant when due.
  ///
  /// Called from the coordinator's drain loop only.
  pub(super) fn poll(&self) -> Option<T> {
    let item = self.queue.lock().pop_front()?;
    if self.prefetch != u64::MAX && !self.terminal_seen.load(Ordering::Acquire) {
      let consumed = self.consumed.load(Ordering::Relaxed) + 1;
      if consumed >= self.threshold {
        self.consumed.store(0, Ordering::Relaxed);
        if let Err(violation) = self.upstream.request(consumed) {
          tracing::warn!(target: super::TARGET, index = self.index, %violation, "replenishing participant failed");
        }
      } else {
        self.consumed.store(consumed, Ordering::Relaxed);
      }
    }
    Some(item)
  }

  /// Returns `true` once the participant terminated and every buffered item was taken.
  pub(super) fn is_finished(&self) -> bool {
    self.done.load(Ordering::Acquire) && self.queue.lock().is_empty()
  }

  pub(super) fn cancel(&self) {
    self.upstream.cancel();
  }

  pub(super) fn discard(&self) {
    self.queue.lock().clear();
  }
}

impl<T: Send + 'static> Subscriber<T> for FanInInner<T> {
  fn on_subscribe(&self, subscription: Arc<dyn Subscription>) {
    if !self.upstream.set(subscription) {
      return;
    }
    if self.parent.is_stopped() {
      self.upstream.cancel();
      return;
    }
    if let Err(violation) = self.upstream.request(self.prefetch) {
      tracing::warn!(target: super::TARGET, index = self.index, %violation, "initial request failed");
    }
  }

  fn on_signal(&self, signal: Signal<T>) {
    let parent = &self.parent;
    match signal {
      | Signal::Item(item) => {
        if self.terminal_seen.load(Ordering::Acquire) || self.upstream.is_cancelled() {
          tracing::trace!(target: super::TARGET, index = self.index, "dropping participant item");
          return;
        }
        self.queue.lock().push_back(item);
      },
      | Signal::Failure(error) => {
        if self.terminal_seen.swap(true, Ordering::AcqRel) {
          tracing::debug!(target: super::TARGET, index = self.index, %error, "dropping duplicate participant failure");
          return;
        }
        parent.participant_failed(self.index, error);
        self.done.store(true, Ordering::Release);
      },
      | Signal::Completion => {
        if self.terminal_seen.swap(true, Ordering::AcqRel) {
          tracing::debug!(target: super::TARGET, index = self.index, "dropping duplicate participant completion");
          return;
        }
        tracing::trace!(target: super::TARGET, index = self.index, "participant completed");
        self.done.store(true, Ordering::Release);
      },
    }
    parent.drain();
  }
}
