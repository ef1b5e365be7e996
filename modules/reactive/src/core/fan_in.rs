//! Merge and concatenate operator.

mod fan_in_coordinator;
mod fan_in_inner;
#[cfg(test)]
mod tests;

use alloc::{sync::Arc, vec::Vec};

use ahash::RandomState;
use fan_in_coordinator::FanInCoordinator;
use hashbrown::HashSet;

use super::{EmptySubscription, FanInConfig, Publisher, SerializedSubscriber, StreamError, Subscriber};

const TARGET: &str = "fraktor::reactive::fan_in";

/// Publisher combining the items of an ordered list of participants.
///
/// Up to [`FanInConfig::concurrency`] participants are drained at once. A concurrency of one
/// concatenates the participants in order; larger values merge them, preserving only the order
/// of each participant's own items. Freed slots activate the next participant without waiting
/// for downstream demand.
///
/// Failures follow [`FanInConfig::failure_mode`]: fail-fast forwards the first failure and
/// cancels the remaining participants, collect-failures lets every participant finish and then
/// forwards a [`StreamError::Composite`] in occurrence order.
pub struct FanIn<T> {
  participants: Arc<[Arc<dyn Publisher<T>>]>,
  config:       FanInConfig,
}

impl<T: Send + 'static> FanIn<T> {
  /// Creates a fan-in over `participants` with `config`.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::InvalidArgument`] when the concurrency or prefetch is zero or when
  /// the same participant instance appears twice.
  pub fn new(participants: Vec<Arc<dyn Publisher<T>>>, config: FanInConfig) -> Result<Self, StreamError> {
    config.validate()?;
    reject_duplicates(&participants)?;
    Ok(Self { participants: participants.into(), config })
  }

  /// Creates a fail-fast merge draining up to `concurrency` participants at once.
  ///
  /// # Errors
  ///
  /// See [`FanIn::new`].
  pub fn merge(participants: Vec<Arc<dyn Publisher<T>>>, concurrency: usize) -> Result<Self, StreamError> {
    Self::new(participants, FanInConfig::default().with_concurrency(concurrency))
  }

  /// Creates a fail-fast concatenation draining one participant at a time, in order.
  ///
  /// # Errors
  ///
  /// See [`FanIn::new`].
  pub fn concatenate(participants: Vec<Arc<dyn Publisher<T>>>) -> Result<Self, StreamError> {
    Self::new(participants, FanInConfig::default().with_concurrency(1))
  }

  /// Returns the configuration.
  #[must_use]
  pub const fn config(&self) -> &FanInConfig {
    &self.config
  }

  /// Returns the number of participants.
  #[must_use]
  pub fn participant_count(&self) -> usize {
    self.participants.len()
  }
}

impl<T: Send + 'static> Publisher<T> for FanIn<T> {
  fn subscribe(&self, subscriber: Arc<dyn Subscriber<T>>) {
    if self.participants.is_empty() {
      tracing::trace!(target: TARGET, "no participants, completing immediately");
      EmptySubscription::complete(&*subscriber);
      return;
    }
    let downstream: Arc<dyn Subscriber<T>> = Arc::new(SerializedSubscriber::new(subscriber));
    FanInCoordinator::new(downstream, self.participants.clone(), self.config).start();
  }
}

fn reject_duplicates<T>(participants: &[Arc<dyn Publisher<T>>]) -> Result<(), StreamError> {
  let mut seen: HashSet<usize, RandomState> = HashSet::with_capacity_and_hasher(participants.len(), RandomState::new());
  for participant in participants {
    if !seen.insert(Arc::as_ptr(participant).cast::<()>().addr()) {
      return Err(StreamError::InvalidArgument { name: "participants", reason: "participant listed more than once" });
    }
  }
  Ok(())
}
