
use alloc::boxed::Box;

use tokio::runtime::{Handle, TryCurrentError};

use crate::core::Executor;

/// [`Executor`] implementation that runs tasks on a Tokio runtime's blocking pool.
///
/// Signal delivery may call arbitrary subscriber code, so tasks are not run on the async
/// worker threads.
pub struct TokioExecutor {
  handle: Handle,
}

impl TokioExecutor {
  /// Creates a new executor using the provided Tokio runtime handle.
  #[must_use]
  pub const fn new(handle: Handle) -> Self {
    Self { handle }
  }

  /// Creates an executor bound to the runtime of the calling context.
  ///
  /// # Errors
  ///
  /// Returns [`TryCurrentError`] when called outside a Tokio runtime.
  pub fn current() -> Result<Self, TryCurrentError> {
    Handle::try_current().map(Self::new)
  }

  /// Returns the internal Tokio runtime handle.
  #[must_use]
  pub const fn handle(&self) -> &Handle {
    &self.handle
  }
}

impl Executor for TokioExecutor {
  fn execute(&self, task: Box<dyn FnOnce() + Send + 'static>) {
    let _ = self.handle.spawn_blocking(task);
  }
}
