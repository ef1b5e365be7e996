use alloc::{borrow::Cow, string::ToString, sync::Arc};
use core::{error::Error, fmt, ptr};

/// Opaque, cloneable payload carried by an upstream failure.
#[derive(Clone)]
pub struct FailureCause {
  inner: Arc<dyn Error + Send + Sync + 'static>,
}

impl FailureCause {
  /// Wraps an arbitrary error.
  #[must_use]
  pub fn new<E>(error: E) -> Self
  where
    E: Error + Send + Sync + 'static, {
    Self { inner: Arc::new(error) }
  }

  /// Creates a cause from a plain message.
  #[must_use]
  pub fn message(message: impl Into<Cow<'static, str>>) -> Self {
    Self::new(MessageCause(message.into()))
  }

  /// Returns the wrapped error.
  #[must_use]
  pub fn as_error(&self) -> &(dyn Error + Send + Sync + 'static) {
    &*self.inner
  }

  /// Attempts to downcast the wrapped error.
  #[must_use]
  pub fn downcast_ref<E>(&self) -> Option<&E>
  where
    E: Error + 'static, {
    self.inner.downcast_ref::<E>()
  }
}

impl fmt::Debug for FailureCause {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("FailureCause").field(&self.inner).finish()
  }
}

impl fmt::Display for FailureCause {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.inner, f)
  }
}

// Causes are opaque; the same instance or the same rendered message counts as equal.
impl PartialEq for FailureCause {
  fn eq(&self, other: &Self) -> bool {
    ptr::addr_eq(Arc::as_ptr(&self.inner), Arc::as_ptr(&other.inner)) || self.to_string() == other.to_string()
  }
}

impl Eq for FailureCause {}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct MessageCause(Cow<'static, str>);
