use alloc::{sync::Arc, vec::Vec};
use core::sync::atomic::Ordering;

use portable_atomic::{AtomicBool, AtomicUsize};

use crate::core::{DemandCounter, ProtocolViolation, Publisher, StreamError, Subscriber, Subscription};

/// Cold publisher replaying a fixed list of items, honouring demand.
///
/// Every subscription replays the list from the start and then completes, or fails with the
/// configured error. Emission is trampolined, so requests issued from `on_next` never recurse.
pub struct SequenceSource<T> {
  items:   Arc<[T]>,
  failure: Option<StreamError>,
}

impl<T> SequenceSource<T>
where
  T: Clone + Send + Sync + 'static,
{
  /// Creates a source that emits `items` and completes.
  #[must_use]
  pub fn new(items: Vec<T>) -> Arc<Self> {
    Arc::new(Self { items: items.into(), failure: None })
  }

  /// Creates a source that emits `items` and then fails with `error`.
  #[must_use]
  pub fn failing(items: Vec<T>, error: StreamError) -> Arc<Self> {
    Arc::new(Self { items: items.into(), failure: Some(error) })
  }
}

impl<T> Publisher<T> for SequenceSource<T>
where
  T: Clone + Send + Sync + 'static,
{
  fn subscribe(&self, subscriber: Arc<dyn Subscriber<T>>) {
    let subscription = Arc::new(SequenceSubscription {
      subscriber: subscriber.clone(),
      items:      self.items.clone(),
      failure:    self.failure.clone(),
      index:      AtomicUsize::new(0),
      requested:  DemandCounter::new(),
      wip:        AtomicUsize::new(0),
      cancelled:  AtomicBool::new(false),
      finished:   AtomicBool::new(false),
    });
    subscriber.on_subscribe(subscription.clone());
    subscription.drain();
  }
}

struct SequenceSubscription<T> {
  subscriber: Arc<dyn Subscriber<T>>,
  items:      Arc<[T]>,
  failure:    Option<StreamError>,
  index:      AtomicUsize,
  requested:  DemandCounter,
  wip:        AtomicUsize,
  cancelled:  AtomicBool,
  finished:   AtomicBool,
}

impl<T> SequenceSubscription<T>
where
  T: Clone + Send + Sync + 'static,
{
  fn drain(&self) {
    if self.wip.fetch_add(1, Ordering::AcqRel) != 0 {
      return;
    }
    let mut missed = 1;
    loop {
      self.emit_available();
      missed = self.wip.fetch_sub(missed, Ordering::AcqRel) - missed;
      if missed == 0 {
        return;
      }
    }
  }

  fn emit_available(&self) {
    let demand = self.requested.current();
    let mut emitted = 0_u64;
    let mut index = self.index.load(Ordering::Acquire);
    while demand.allows(emitted) && !self.cancelled.load(Ordering::Acquire) {
      let Some(item) = self.items.get(index) else {
        break;
      };
      self.subscriber.on_next(item.clone());
      index += 1;
      emitted += 1;
    }
    self.index.store(index, Ordering::Release);
    if emitted > 0 {
      self.requested.produced(emitted);
    }
    if index >= self.items.len()
      && !self.cancelled.load(Ordering::Acquire)
      && !self.finished.swap(true, Ordering::AcqRel)
    {
      match &self.failure {
        | Some(error) => self.subscriber.on_error(error.clone()),
        | None => self.subscriber.on_complete(),
      }
    }
  }
}

impl<T> Subscription for SequenceSubscription<T>
where
  T: Clone + Send + Sync + 'static,
{
  fn request(&self, amount: u64) {
    if amount == 0 {
      self.cancelled.store(true, Ordering::Release);
      if !self.finished.swap(true, Ordering::AcqRel) {
        self.subscriber.on_error(ProtocolViolation::NonPositiveRequest.into());
      }
      return;
    }
    self.requested.add(amount);
    self.drain();
  }

  fn cancel(&self) {
    self.cancelled.store(true, Ordering::Release);
  }
}
