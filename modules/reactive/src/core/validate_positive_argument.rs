#[cfg(test)]
mod tests;

use super::StreamError;

/// Validates that the provided argument is greater than zero.
///
/// # Errors
///
/// Returns [`StreamError::InvalidArgument`] when `value` is zero.
pub fn validate_positive_argument<N>(name: &'static str, value: N) -> Result<N, StreamError>
where
  N: Copy + Default + PartialEq, {
  if value == N::default() {
    return Err(StreamError::InvalidArgument { name, reason: "must be greater than zero" });
  }
  Ok(value)
}
