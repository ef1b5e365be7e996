/// How a fan-in operator reacts to participant failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
  /// The first failure cancels every other participant and is forwarded immediately.
  #[default]
  FailFast,
  /// Every participant runs to its end; collected failures are forwarded as one composite
  /// failure after the last participant finishes.
  CollectFailures,
}

impl FailureMode {
  /// Returns `true` for [`FailureMode::CollectFailures`].
  #[must_use]
  pub const fn collects(self) -> bool {
    matches!(self, Self::CollectFailures)
  }
}
