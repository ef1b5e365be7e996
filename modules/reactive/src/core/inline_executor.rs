use alloc::boxed::Box;

use super::Executor;

/// Executor that runs tasks immediately on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineExecutor;

impl InlineExecutor {
  /// Returns an executor that runs tasks on the calling thread.
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

impl Executor for InlineExecutor {
  fn execute(&self, task: Box<dyn FnOnce() + Send + 'static>) {
    task();
  }
}
