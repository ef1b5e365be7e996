use super::StreamError;

/// A single downstream signal.
///
/// Items are followed by at most one terminal signal, either [`Signal::Failure`] or
/// [`Signal::Completion`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal<T> {
  /// An item emitted by the upstream.
  Item(T),
  /// Terminal failure.
  Failure(StreamError),
  /// Terminal successful completion.
  Completion,
}

impl<T> Signal<T> {
  /// Returns `true` for failure and completion signals.
  #[must_use]
  pub const fn is_terminal(&self) -> bool {
    matches!(self, Self::Failure(_) | Self::Completion)
  }

  /// Transforms the carried item, leaving terminal signals untouched.
  #[must_use]
  pub fn map<U, F>(self, f: F) -> Signal<U>
  where
    F: FnOnce(T) -> U, {
    match self {
      | Self::Item(item) => Signal::Item(f(item)),
      | Self::Failure(error) => Signal::Failure(error),
      | Self::Completion => Signal::Completion,
    }
  }
}
