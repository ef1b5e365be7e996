//! Fluent operator constructors.

#[cfg(test)]
mod tests;

use alloc::sync::Arc;

use super::{EmitOn, Executor, IgnoreElements, Map, Publisher, SkipUntil, StreamError};

/// Fluent constructors for the operators in this crate.
///
/// Every method wraps `self` into the corresponding operator publisher; nothing is subscribed
/// until the resulting publisher is.
pub trait PublisherExt<T: Send + 'static>: Publisher<T> + Sized + 'static {
  /// See [`SkipUntil`].
  fn skip_until<U: Send + 'static>(self, other: Arc<dyn Publisher<U>>) -> SkipUntil<T, U> {
    SkipUntil::new(Arc::new(self), other)
  }

  /// See [`Map::new`].
  fn map<O, F>(self, mapper: F) -> Map<T, O>
  where
    O: Send + 'static,
    F: Fn(T) -> O + Send + Sync + 'static, {
    Map::new(Arc::new(self), mapper)
  }

  /// See [`Map::try_new`].
  fn try_map<O, F>(self, mapper: F) -> Map<T, O>
  where
    O: Send + 'static,
    F: Fn(T) -> Result<O, StreamError> + Send + Sync + 'static, {
    Map::try_new(Arc::new(self), mapper)
  }

  /// See [`IgnoreElements`].
  fn ignore_elements(self) -> IgnoreElements<T> {
    IgnoreElements::new(Arc::new(self))
  }

  /// See [`EmitOn`].
  fn emit_on(self, executor: Arc<dyn Executor>) -> EmitOn<T> {
    EmitOn::new(Arc::new(self), executor)
  }
}

impl<T, P> PublisherExt<T> for P
where
  T: Send + 'static,
  P: Publisher<T> + Sized + 'static,
{
}
