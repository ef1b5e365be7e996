//! Decorator state shared by transforming operators.

mod hand_off_state;

use alloc::sync::Arc;
use core::sync::atomic::Ordering;

use hand_off_state::HandOffState;
use portable_atomic::{AtomicBool, AtomicU8};
use spin::Mutex;

use super::{EmptySubscription, ProtocolViolation, Signal, StreamError, Subscriber, Subscription, SubscriptionCell};

const TARGET: &str = "fraktor::reactive::operator";

/// Decorator state an operator composes to sit between one upstream and one downstream.
///
/// The operator implements [`Subscriber`] toward its upstream and [`Subscription`] toward its
/// downstream; `OperatorCore` provides the default behaviour of both sides:
///
/// - `request(n)` is forwarded upstream unchanged (`n == 0` fails the pipeline),
/// - `cancel()` cancels upstream and drops every later signal,
/// - items and terminals pass through until the operator terminates, with exactly one terminal
///   reaching the downstream.
///
/// The downstream always observes `on_subscribe` first. A terminal racing an in-progress
/// hand-off is parked and delivered by the handing-off thread once `on_subscribe` returns.
pub struct OperatorCore<O> {
  upstream:   SubscriptionCell,
  downstream: Arc<dyn Subscriber<O>>,
  terminated: AtomicBool,
  hand_off:   AtomicU8,
  parked:     Mutex<Option<Signal<O>>>,
}

impl<O: Send + 'static> OperatorCore<O> {
  /// Creates the decorator state for `downstream`.
  #[must_use]
  pub fn new(downstream: Arc<dyn Subscriber<O>>) -> Self {
    Self {
      upstream: SubscriptionCell::new(),
      downstream,
      terminated: AtomicBool::new(false),
      hand_off: AtomicU8::new(HandOffState::Pending as u8),
      parked: Mutex::new(None),
    }
  }

  /// Returns the upstream subscription cell.
  #[must_use]
  pub const fn upstream(&self) -> &SubscriptionCell {
    &self.upstream
  }

  /// Returns `true` once the operator has delivered a terminal signal or was cancelled.
  #[must_use]
  pub fn is_terminated(&self) -> bool {
    self.terminated.load(Ordering::Acquire)
  }

  /// Stores the upstream handle and hands `handle` to the downstream.
  ///
  /// Duplicate upstream handles, and handles arriving after termination, are cancelled.
  /// Returns `true` when `upstream` was accepted.
  pub fn on_subscribe(&self, upstream: Arc<dyn Subscription>, handle: Arc<dyn Subscription>) -> bool {
    if !self.upstream.set(upstream) {
      return false;
    }
    if self.is_terminated() {
      self.upstream.cancel();
      return false;
    }
    if HandOffState::compare_exchange(HandOffState::Pending, HandOffState::InProgress, &self.hand_off).is_ok() {
      self.downstream.on_subscribe(handle);
      let parked = {
        let mut parked = self.parked.lock();
        HandOffState::Done.store(&self.hand_off);
        parked.take()
      };
      if let Some(terminal) = parked {
        tracing::trace!(target: TARGET, "delivering terminal parked behind the hand-off");
        self.downstream.on_signal(terminal);
      }
    }
    true
  }

  /// Checks that a signal arrived after `on_subscribe`.
  ///
  /// Otherwise the operator fails downstream with [`ProtocolViolation::SignalBeforeSubscribe`]
  /// and `false` is returned.
  pub fn ensure_subscribed(&self) -> bool {
    if self.upstream.is_set() {
      return true;
    }
    tracing::warn!(target: TARGET, "signal received before on_subscribe");
    self.fail_and_cancel(ProtocolViolation::SignalBeforeSubscribe.into());
    false
  }

  /// Forwards `amount` upstream, failing the pipeline on a protocol violation.
  pub fn request(&self, amount: u64) {
    if let Err(violation) = self.upstream.request(amount) {
      tracing::warn!(target: TARGET, %violation, "rejecting request");
      self.fail_and_cancel(violation.into());
    }
  }

  /// Cancels upstream and terminates the operator.
  pub fn cancel(&self) {
    self.terminated.store(true, Ordering::Release);
    self.upstream.cancel();
  }

  /// Delivers an item unless the operator has terminated.
  pub fn emit(&self, item: O) {
    if self.is_terminated() {
      tracing::trace!(target: TARGET, "dropping item after termination");
      return;
    }
    self.downstream.on_next(item);
  }

  /// Delivers a failure, once.
  pub fn fail(&self, error: StreamError) {
    if self.terminated.swap(true, Ordering::AcqRel) {
      tracing::debug!(target: TARGET, %error, "dropping failure after termination");
      return;
    }
    self.deliver_terminal(Signal::Failure(error));
  }

  /// Delivers completion, once.
  pub fn complete(&self) {
    if self.terminated.swap(true, Ordering::AcqRel) {
      tracing::debug!(target: TARGET, "dropping completion after termination");
      return;
    }
    self.deliver_terminal(Signal::Completion);
  }

  /// Cancels upstream and delivers `error`, once.
  ///
  /// Used when the operator's own processing fails.
  pub fn fail_and_cancel(&self, error: StreamError) {
    self.upstream.cancel();
    self.fail(error);
  }

  /// Routes `signal` to [`emit`](Self::emit), [`fail`](Self::fail) or
  /// [`complete`](Self::complete).
  pub fn deliver(&self, signal: Signal<O>) {
    match signal {
      | Signal::Item(item) => self.emit(item),
      | Signal::Failure(error) => self.fail(error),
      | Signal::Completion => self.complete(),
    }
  }

  // A terminal may precede the upstream handshake (e.g. a secondary source failing first).
  fn deliver_terminal(&self, terminal: Signal<O>) {
    match HandOffState::compare_exchange(HandOffState::Pending, HandOffState::Done, &self.hand_off) {
      | Ok(_) => self.downstream.on_subscribe(Arc::new(EmptySubscription)),
      | Err(HandOffState::InProgress) => {
        let mut parked = self.parked.lock();
        if HandOffState::load(&self.hand_off) == HandOffState::InProgress {
          tracing::trace!(target: TARGET, "parking terminal until the hand-off completes");
          *parked = Some(terminal);
          return;
        }
      },
      | Err(_) => {},
    }
    self.downstream.on_signal(terminal);
  }
}
