use alloc::vec::Vec;
use core::fmt;

use super::StreamError;

/// Non-empty, ordered aggregation of failures collected by a fan-in operator.
///
/// Causes are kept in the order the failures occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeFailure {
  causes: Vec<StreamError>,
}

impl CompositeFailure {
  /// Builds a composite from collected causes. Returns `None` when nothing was collected.
  #[must_use]
  pub fn new(causes: Vec<StreamError>) -> Option<Self> {
    if causes.is_empty() { None } else { Some(Self { causes }) }
  }

  /// Returns the collected causes in occurrence order.
  #[must_use]
  pub fn causes(&self) -> &[StreamError] {
    &self.causes
  }

  /// Consumes the composite and returns the collected causes.
  #[must_use]
  pub fn into_causes(self) -> Vec<StreamError> {
    self.causes
  }
}

impl fmt::Display for CompositeFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "composite failure ({} causes): ", self.causes.len())?;
    for (index, cause) in self.causes.iter().enumerate() {
      if index > 0 {
        f.write_str("; ")?;
      }
      write!(f, "{cause}")?;
    }
    Ok(())
  }
}
