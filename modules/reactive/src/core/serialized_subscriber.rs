//! Signal serializing subscriber wrapper.

mod cancel_tracking_subscription;

use alloc::{collections::VecDeque, sync::Arc};
use core::sync::atomic::Ordering;

use portable_atomic::{AtomicBool, AtomicUsize};
use spin::Mutex;

use cancel_tracking_subscription::CancelTrackingSubscription;

use super::{Signal, Subscriber, Subscription};

const TARGET: &str = "fraktor::reactive::serialized";

enum Pending<T> {
  Subscribe(Arc<dyn Subscription>),
  Signal(Signal<T>),
}

/// Subscriber wrapper that forwards signals one at a time.
///
/// Callers may invoke the wrapper concurrently (or reentrantly). Each call enqueues its signal,
/// and the caller that raises the work-in-progress counter from zero drains the queue in arrival
/// order until the counter drops back to zero. Exactly one terminal signal is forwarded; items
/// and terminals arriving after it are discarded, and so is everything still queued once the
/// downstream cancels through the handle it received.
///
/// The queue only holds signals submitted while another call is draining. Items are bounded by
/// the demand the downstream has outstanding (upstreams emit no more than requested), plus the
/// handshake and a single terminal; nothing is queued behind an accepted terminal.
pub struct SerializedSubscriber<T> {
  downstream:           Arc<dyn Subscriber<T>>,
  queue:                Mutex<VecDeque<Pending<T>>>,
  wip:                  AtomicUsize,
  terminal_accepted:    AtomicBool,
  terminal_delivered:   AtomicBool,
  downstream_cancelled: Arc<AtomicBool>,
}

impl<T: Send + 'static> SerializedSubscriber<T> {
  /// Wraps `downstream`.
  #[must_use]
  pub fn new(downstream: Arc<dyn Subscriber<T>>) -> Self {
    Self {
      downstream,
      queue: Mutex::new(VecDeque::new()),
      wip: AtomicUsize::new(0),
      terminal_accepted: AtomicBool::new(false),
      terminal_delivered: AtomicBool::new(false),
      downstream_cancelled: Arc::new(AtomicBool::new(false)),
    }
  }

  /// Returns `true` once a terminal signal has been accepted for delivery.
  #[must_use]
  pub fn is_terminated(&self) -> bool {
    self.terminal_accepted.load(Ordering::Acquire)
  }

  #[cfg(test)]
  #[must_use]
  pub(crate) fn queued_len(&self) -> usize {
    self.queue.lock().len()
  }

  fn submit(&self, pending: Pending<T>) {
    self.queue.lock().push_back(pending);
    if self.wip.fetch_add(1, Ordering::AcqRel) != 0 {
      return;
    }
    self.drain();
  }

  fn drain(&self) {
    let mut missed = 1;
    loop {
      loop {
        let next = self.queue.lock().pop_front();
        let Some(pending) = next else {
          break;
        };
        self.forward(pending);
      }
      missed = self.wip.fetch_sub(missed, Ordering::AcqRel) - missed;
      if missed == 0 {
        return;
      }
    }
  }

  fn forward(&self, pending: Pending<T>) {
    match pending {
      | Pending::Subscribe(subscription) => {
        let tracked = CancelTrackingSubscription::new(subscription, self.downstream_cancelled.clone());
        self.downstream.on_subscribe(Arc::new(tracked));
      },
      | Pending::Signal(signal) => {
        if self.downstream_cancelled.load(Ordering::Acquire) {
          tracing::trace!(target: TARGET, "discarding signal queued before downstream cancellation");
          return;
        }
        if self.terminal_delivered.load(Ordering::Acquire) {
          tracing::trace!(target: TARGET, "discarding signal queued behind a terminal");
          return;
        }
        if signal.is_terminal() {
          self.terminal_delivered.store(true, Ordering::Release);
        }
        self.downstream.on_signal(signal);
      },
    }
  }
}

impl<T: Send + 'static> Subscriber<T> for SerializedSubscriber<T> {
  fn on_subscribe(&self, subscription: Arc<dyn Subscription>) {
    self.submit(Pending::Subscribe(subscription));
  }

  fn on_signal(&self, signal: Signal<T>) {
    if signal.is_terminal() {
      if self.terminal_accepted.swap(true, Ordering::AcqRel) {
        tracing::debug!(target: TARGET, "discarding duplicate terminal signal");
        return;
      }
    } else if self.terminal_accepted.load(Ordering::Acquire) {
      tracing::trace!(target: TARGET, "discarding item after terminal signal");
      return;
    }
    self.submit(Pending::Signal(signal));
  }
}
