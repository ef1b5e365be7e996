use alloc::boxed::Box;

/// Scheduler used by operators that move signal delivery off the calling thread.
///
/// Tasks submitted from one operator must eventually run, in submission order relative to each
/// other when they are not already serialized by the operator.
pub trait Executor: Send + Sync {
  /// Schedules `task` for execution.
  fn execute(&self, task: Box<dyn FnOnce() + Send + 'static>);
}
