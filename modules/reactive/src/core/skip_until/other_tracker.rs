use alloc::sync::{Arc, Weak};

use super::SkipUntilMain;
use crate::core::{Signal, Subscriber, Subscription};

/// Subscriber attached to the secondary publisher; any item or completion opens the gate.
pub(super) struct OtherTracker<T> {
  main: Weak<SkipUntilMain<T>>,
}

impl<T> OtherTracker<T> {
  pub(super) const fn new(main: Weak<SkipUntilMain<T>>) -> Self {
    Self { main }
  }
}

impl<T, U> Subscriber<U> for OtherTracker<T>
where
  T: Send + 'static,
{
  fn on_subscribe(&self, subscription: Arc<dyn Subscription>) {
    match self.main.upgrade() {
      | Some(main) => main.set_other_subscription(subscription),
      | None => subscription.cancel(),
    }
  }

  fn on_signal(&self, signal: Signal<U>) {
    let Some(main) = self.main.upgrade() else {
      return;
    };
    match signal {
      | Signal::Item(_) | Signal::Completion => main.open(),
      | Signal::Failure(error) => main.other_failed(error),
    }
  }
}
