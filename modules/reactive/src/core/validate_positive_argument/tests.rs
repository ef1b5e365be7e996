use crate::core::{StreamError, validate_positive_argument};

#[test]
fn zero_is_rejected_with_the_argument_name() {
  assert_eq!(
    validate_positive_argument("prefetch", 0_u64),
    Err(StreamError::InvalidArgument { name: "prefetch", reason: "must be greater than zero" })
  );
}

#[test]
fn positive_values_pass_through() {
  assert_eq!(validate_positive_argument("concurrency", 4_usize), Ok(4));
  assert_eq!(validate_positive_argument("prefetch", u64::MAX), Ok(u64::MAX));
}
