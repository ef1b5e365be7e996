
/// Outstanding demand observed on a subscription.
///
/// `u64::MAX` requested items are treated as unbounded, mirroring the saturation rule of the
/// request protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demand {
  /// Finite demand with remaining count.
  Finite(u64),
  /// Unbounded demand.
  Unbounded,
}

impl Demand {
  /// Converts a raw counter value into a demand.
  #[must_use]
  pub const fn from_raw(raw: u64) -> Self {
    if raw == u64::MAX { Self::Unbounded } else { Self::Finite(raw) }
  }

  /// Returns the raw counter value for this demand.
  #[must_use]
  pub const fn into_raw(self) -> u64 {
    match self {
      | Self::Finite(value) => value,
      | Self::Unbounded => u64::MAX,
    }
  }

  /// Returns `true` if the demand is unbounded.
  #[must_use]
  pub const fn is_unbounded(&self) -> bool {
    matches!(self, Self::Unbounded)
  }

  /// Returns `true` if there is remaining demand.
  #[must_use]
  pub const fn has_demand(&self) -> bool {
    matches!(self, Self::Unbounded) || matches!(self, Self::Finite(remaining) if *remaining > 0)
  }

  /// Returns the remaining finite demand, if any.
  #[must_use]
  pub const fn remaining(&self) -> Option<u64> {
    match self {
      | Self::Finite(value) => Some(*value),
      | Self::Unbounded => None,
    }
  }

  /// Returns `true` when another item may be delivered after `delivered` items.
  #[must_use]
  pub const fn allows(&self, delivered: u64) -> bool {
    match self {
      | Self::Finite(value) => delivered < *value,
      | Self::Unbounded => true,
    }
  }

  /// Adds `amount` to the demand, saturating into [`Demand::Unbounded`].
  #[must_use]
  pub const fn saturating_add(self, amount: u64) -> Self {
    match self {
      | Self::Unbounded => Self::Unbounded,
      | Self::Finite(current) => match current.checked_add(amount) {
        | Some(total) => Self::from_raw(total),
        | None => Self::Unbounded,
      },
    }
  }
}
