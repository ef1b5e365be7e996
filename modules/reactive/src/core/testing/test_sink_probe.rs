use alloc::{sync::Arc, vec::Vec};
use core::sync::atomic::Ordering;

use portable_atomic::{AtomicBool, AtomicUsize};
use spin::Mutex;

use crate::core::{Signal, StreamError, Subscriber, Subscription, SubscriptionCell};

/// Recording subscriber.
///
/// Requests `initial_request` items on subscription (nothing when zero) and records every
/// signal. It also records protocol breaches observed on its side: overlapping deliveries,
/// signals after a terminal, and repeated `on_subscribe` calls.
pub struct TestSinkProbe<T> {
  subscription:    SubscriptionCell,
  initial_request: u64,
  state:           Mutex<SinkState<T>>,
  subscribes:      AtomicUsize,
  in_signal:       AtomicBool,
  overlapping:     AtomicBool,
  after_terminal:  AtomicUsize,
}

struct SinkState<T> {
  items:    Vec<T>,
  terminal: Option<Result<(), StreamError>>,
}

impl<T: Send + 'static> TestSinkProbe<T> {
  /// Creates a probe that requests `initial_request` items on subscription.
  #[must_use]
  pub fn new(initial_request: u64) -> Arc<Self> {
    Arc::new(Self {
      subscription: SubscriptionCell::new(),
      initial_request,
      state: Mutex::new(SinkState { items: Vec::new(), terminal: None }),
      subscribes: AtomicUsize::new(0),
      in_signal: AtomicBool::new(false),
      overlapping: AtomicBool::new(false),
      after_terminal: AtomicUsize::new(0),
    })
  }

  /// Creates a probe with unbounded initial demand.
  #[must_use]
  pub fn unbounded() -> Arc<Self> {
    Self::new(u64::MAX)
  }

  /// Requests more items through the received subscription.
  pub fn request(&self, amount: u64) {
    match self.subscription.get() {
      | Some(subscription) => subscription.request(amount),
      | None => tracing::warn!(target: "fraktor::reactive::testing", "request before subscription"),
    }
  }

  /// Cancels the received subscription.
  pub fn cancel(&self) {
    if let Some(subscription) = self.subscription.get() {
      subscription.cancel();
    }
  }

  /// Returns the received items.
  #[must_use]
  pub fn items(&self) -> Vec<T>
  where
    T: Clone, {
    self.state.lock().items.clone()
  }

  /// Returns the number of received items.
  #[must_use]
  pub fn item_count(&self) -> usize {
    self.state.lock().items.len()
  }

  /// Returns `true` once a completion was received.
  #[must_use]
  pub fn is_completed(&self) -> bool {
    matches!(self.state.lock().terminal, Some(Ok(())))
  }

  /// Returns the received failure, if any.
  #[must_use]
  pub fn failure(&self) -> Option<StreamError> {
    match &self.state.lock().terminal {
      | Some(Err(error)) => Some(error.clone()),
      | _ => None,
    }
  }

  /// Returns `true` once any terminal signal was received.
  #[must_use]
  pub fn is_terminated(&self) -> bool {
    self.state.lock().terminal.is_some()
  }

  /// Returns `true` once a subscription was received.
  #[must_use]
  pub fn is_subscribed(&self) -> bool {
    self.subscription.is_set()
  }

  /// Returns how many times `on_subscribe` was called.
  #[must_use]
  pub fn subscribe_count(&self) -> usize {
    self.subscribes.load(Ordering::Acquire)
  }

  /// Returns `true` when two signals were ever delivered at the same time.
  #[must_use]
  pub fn has_overlapping_signals(&self) -> bool {
    self.overlapping.load(Ordering::Acquire)
  }

  /// Returns how many signals arrived after the terminal signal.
  #[must_use]
  pub fn signals_after_terminal(&self) -> usize {
    self.after_terminal.load(Ordering::Acquire)
  }

  fn record(&self, signal: Signal<T>) {
    let mut state = self.state.lock();
    if state.terminal.is_some() {
      self.after_terminal.fetch_add(1, Ordering::AcqRel);
      return;
    }
    match signal {
      | Signal::Item(item) => state.items.push(item),
      | Signal::Failure(error) => state.terminal = Some(Err(error)),
      | Signal::Completion => state.terminal = Some(Ok(())),
    }
  }
}

impl<T: Send + 'static> Subscriber<T> for TestSinkProbe<T> {
  fn on_subscribe(&self, subscription: Arc<dyn Subscription>) {
    self.subscribes.fetch_add(1, Ordering::AcqRel);
    if !self.subscription.set(subscription) {
      return;
    }
    if self.initial_request > 0 {
      self.request(self.initial_request);
    }
  }

  fn on_signal(&self, signal: Signal<T>) {
    if self.in_signal.swap(true, Ordering::AcqRel) {
      self.overlapping.store(true, Ordering::Release);
    }
    self.record(signal);
    self.in_signal.store(false, Ordering::Release);
  }
}
