//! Stream error definitions.


use alloc::borrow::Cow;

use super::{CompositeFailure, FailureCause, ProtocolViolation};

/// Errors produced by publishers, operators and their construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
  /// Construction input was rejected. Raised synchronously, never signalled.
  #[error("invalid argument `{name}`: {reason}")]
  InvalidArgument {
    /// Name of the offending argument.
    name:   &'static str,
    /// Why the argument was rejected.
    reason: &'static str,
  },
  /// Failure signalled by a source publisher.
  #[error("upstream failure: {0}")]
  Upstream(FailureCause),
  /// Ordered aggregation of failures collected by a fan-in operator.
  #[error("{0}")]
  Composite(CompositeFailure),
  /// A participant broke the subscription protocol.
  #[error("protocol violation: {0}")]
  ProtocolViolation(#[from] ProtocolViolation),
}

impl StreamError {
  /// Creates an upstream failure carrying a plain message.
  #[must_use]
  pub fn upstream(message: impl Into<Cow<'static, str>>) -> Self {
    Self::Upstream(FailureCause::message(message))
  }

  /// Creates an upstream failure wrapping an arbitrary error.
  #[must_use]
  pub fn from_cause<E>(error: E) -> Self
  where
    E: core::error::Error + Send + Sync + 'static, {
    Self::Upstream(FailureCause::new(error))
  }

  /// Returns the aggregated failure when this is a composite error.
  #[must_use]
  pub const fn as_composite(&self) -> Option<&CompositeFailure> {
    match self {
      | Self::Composite(composite) => Some(composite),
      | _ => None,
    }
  }
}
