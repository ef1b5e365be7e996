use alloc::{
  sync::{Arc, Weak},
  vec::Vec,
};
use core::{mem, sync::atomic::Ordering};

use portable_atomic::{AtomicBool, AtomicUsize};
use spin::Mutex;

use super::{TARGET, fan_in_inner::FanInInner};
use crate::core::{
  CompositeFailure, DemandCounter, FanInConfig, ProtocolViolation, Publisher, StreamError, Subscriber, Subscription,
};

/// Drives participant activation and moves buffered items downstream under demand.
///
/// Every state change (new demand, buffered item, participant terminal, cancellation) calls
/// [`drain`](Self::drain); the work-in-progress counter makes exactly one thread run the loop
/// at a time, so downstream signals are never emitted concurrently.
pub(super) struct FanInCoordinator<T> {
  me:               Weak<Self>,
  downstream:       Arc<dyn Subscriber<T>>,
  participants:     Arc<[Arc<dyn Publisher<T>>]>,
  config:           FanInConfig,
  next_participant: AtomicUsize,
  active_count:     AtomicUsize,
  active:           Mutex<Vec<Arc<FanInInner<T>>>>,
  requested:        DemandCounter,
  wip:              AtomicUsize,
  cursor:           AtomicUsize,
  cancelled:        AtomicBool,
  terminated:       AtomicBool,
  fatal:            Mutex<Option<StreamError>>,
  collected:        Mutex<Vec<StreamError>>,
}

impl<T: Send + 'static> FanInCoordinator<T> {
  pub(super) fn new(
    downstream: Arc<dyn Subscriber<T>>,
    participants: Arc<[Arc<dyn Publisher<T>>]>,
    config: FanInConfig,
  ) -> Arc<Self> {
    Arc::new_cyclic(|me| Self {
      me: me.clone(),
      downstream,
      participants,
      config,
      next_participant: AtomicUsize::new(0),
      active_count: AtomicUsize::new(0),
      active: Mutex::new(Vec::new()),
      requested: DemandCounter::new(),
      wip: AtomicUsize::new(0),
      cursor: AtomicUsize::new(0),
      cancelled: AtomicBool::new(false),
      terminated: AtomicBool::new(false),
      fatal: Mutex::new(None),
      collected: Mutex::new(Vec::new()),
    })
  }

  pub(super) fn start(self: &Arc<Self>) {
    self.downstream.on_subscribe(self.clone());
    self.drain();
  }

  /// Returns `true` once the operator was cancelled, failed or finished.
  pub(super) fn is_stopped(&self) -> bool {
    self.cancelled.load(Ordering::Acquire) || self.terminated.load(Ordering::Acquire) || self.fatal.lock().is_some()
  }

  pub(super) fn participant_failed(&self, index: usize, error: StreamError) {
    if self.config.failure_mode().collects() {
      tracing::debug!(target: TARGET, index, %error, "collecting participant failure");
      self.collected.lock().push(error);
      return;
    }
    {
      let mut fatal = self.fatal.lock();
      if fatal.is_some() {
        tracing::debug!(target: TARGET, index, %error, "dropping failure behind an earlier one");
        return;
      }
      *fatal = Some(error);
    }
    tracing::debug!(target: TARGET, index, "participant failed, cancelling the others");
    self.cancel_active();
  }

  pub(super) fn drain(&self) {
    if self.wip.fetch_add(1, Ordering::AcqRel) != 0 {
      return;
    }
    let mut missed = 1;
    loop {
      self.drain_once();
      missed = self.wip.fetch_sub(missed, Ordering::AcqRel) - missed;
      if missed == 0 {
        return;
      }
    }
  }

  fn drain_once(&self) {
    loop {
      if self.terminated.load(Ordering::Acquire) {
        return;
      }
      if self.cancelled.load(Ordering::Acquire) {
        self.stop_cancelled();
        return;
      }
      let fatal = self.fatal.lock().take();
      if let Some(error) = fatal {
        self.terminated.store(true, Ordering::Release);
        self.discard_active();
        self.downstream.on_error(error);
        return;
      }
      self.fill_slots();
      let emitted = self.emit_buffered();
      let finished = self.remove_finished();
      // The downstream may cancel from inside `on_next`.
      if self.cancelled.load(Ordering::Acquire) {
        self.stop_cancelled();
        return;
      }
      if self.next_participant.load(Ordering::Acquire) >= self.participants.len()
        && self.active_count.load(Ordering::Acquire) == 0
      {
        self.finish();
        return;
      }
      if emitted == 0 && finished == 0 {
        return;
      }
    }
  }

  fn fill_slots(&self) {
    while !self.is_stopped() && self.active_count.load(Ordering::Acquire) < self.config.concurrency() {
      let index = self.next_participant.load(Ordering::Acquire);
      let Some(participant) = self.participants.get(index) else {
        return;
      };
      let Some(me) = self.me.upgrade() else {
        return;
      };
      self.next_participant.store(index + 1, Ordering::Release);
      self.active_count.fetch_add(1, Ordering::AcqRel);
      let inner = Arc::new(FanInInner::new(me, index, &self.config));
      self.active.lock().push(inner.clone());
      tracing::debug!(target: TARGET, index, "activating participant");
      participant.subscribe(inner);
    }
  }

  fn emit_buffered(&self) -> u64 {
    let snapshot = self.active.lock().clone();
    if snapshot.is_empty() {
      return 0;
    }
    let demand = self.requested.current();
    let start = self.cursor.load(Ordering::Relaxed) % snapshot.len();
    let mut emitted = 0_u64;
    let mut progressed = true;
    while progressed && demand.allows(emitted) {
      progressed = false;
      for offset in 0..snapshot.len() {
        if !demand.allows(emitted) || self.is_stopped() {
          break;
        }
        if let Some(item) = snapshot[(start + offset) % snapshot.len()].poll() {
          self.downstream.on_next(item);
          emitted += 1;
          progressed = true;
        }
      }
    }
    self.cursor.store(start + 1, Ordering::Relaxed);
    if emitted > 0 {
      self.requested.produced(emitted);
    }
    emitted
  }

  fn remove_finished(&self) -> usize {
    let finished: Vec<Arc<FanInInner<T>>> = {
      let mut active = self.active.lock();
      let (finished, remaining): (Vec<_>, Vec<_>) = active.drain(..).partition(|inner| inner.is_finished());
      *active = remaining;
      finished
    };
    for inner in &finished {
      tracing::trace!(target: TARGET, index = inner.index(), "participant finished");
      self.active_count.fetch_sub(1, Ordering::AcqRel);
    }
    finished.len()
  }

  fn stop_cancelled(&self) {
    self.terminated.store(true, Ordering::Release);
    self.discard_active();
  }

  fn finish(&self) {
    if self.cancelled.load(Ordering::Acquire) {
      self.stop_cancelled();
      return;
    }
    self.terminated.store(true, Ordering::Release);
    let collected = mem::take(&mut *self.collected.lock());
    match CompositeFailure::new(collected) {
      | Some(composite) => {
        tracing::debug!(target: TARGET, causes = composite.causes().len(), "forwarding composite failure");
        self.downstream.on_error(StreamError::Composite(composite));
      },
      | None => {
        tracing::trace!(target: TARGET, "all participants completed");
        self.downstream.on_complete();
      },
    }
  }

  fn cancel_active(&self) {
    let snapshot = self.active.lock().clone();
    for inner in snapshot {
      inner.cancel();
    }
  }

  fn discard_active(&self) {
    let snapshot = mem::take(&mut *self.active.lock());
    for inner in snapshot {
      inner.cancel();
      inner.discard();
    }
  }
}

impl<T: Send + 'static> Subscription for FanInCoordinator<T> {
  fn request(&self, amount: u64) {
    if amount == 0 {
      tracing::warn!(target: TARGET, "rejecting request(0)");
      {
        let mut fatal = self.fatal.lock();
        if fatal.is_none() {
          *fatal = Some(ProtocolViolation::NonPositiveRequest.into());
        }
      }
      self.cancel_active();
      self.drain();
      return;
    }
    self.requested.add(amount);
    self.drain();
  }

  fn cancel(&self) {
    if self.cancelled.swap(true, Ordering::AcqRel) {
      return;
    }
    tracing::trace!(target: TARGET, "cancelled by downstream");
    self.cancel_active();
    self.drain();
  }
}
