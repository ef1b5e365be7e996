//! Operator discarding main items until a secondary publisher fires.

mod other_tracker;
mod skip_until_main;

use alloc::sync::Arc;

use other_tracker::OtherTracker;
use skip_until_main::SkipUntilMain;

use super::{Publisher, SerializedSubscriber, Subscriber};

/// Publisher that suppresses main items until the secondary emits an item or completes.
///
/// While the gate is closed every suppressed item is compensated with `request(1)` upstream, so
/// suppressed items never consume downstream demand. Once open, the gate never closes again and
/// the secondary subscription is cancelled.
///
/// A secondary failure before the gate opens fails the pipeline; afterwards it is ignored.
pub struct SkipUntil<T, U> {
  upstream: Arc<dyn Publisher<T>>,
  other:    Arc<dyn Publisher<U>>,
}

impl<T, U> SkipUntil<T, U>
where
  T: Send + 'static,
  U: Send + 'static,
{
  /// Gates `upstream` on `other`.
  #[must_use]
  pub fn new(upstream: Arc<dyn Publisher<T>>, other: Arc<dyn Publisher<U>>) -> Self {
    Self { upstream, other }
  }
}

impl<T, U> Publisher<T> for SkipUntil<T, U>
where
  T: Send + 'static,
  U: Send + 'static,
{
  fn subscribe(&self, subscriber: Arc<dyn Subscriber<T>>) {
    let serialized: Arc<dyn Subscriber<T>> = Arc::new(SerializedSubscriber::new(subscriber));
    let main = SkipUntilMain::new(serialized);
    self.other.subscribe(Arc::new(OtherTracker::new(Arc::downgrade(&main))));
    if main.is_terminated() {
      return;
    }
    self.upstream.subscribe(main);
  }
}
