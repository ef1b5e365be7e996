use crate::core::{FailureMode, FanInConfig, StreamError};

#[test]
fn defaults_fail_fast_with_bounded_concurrency() {
  let config = FanInConfig::default();

  assert_eq!(config.concurrency(), 128);
  assert_eq!(config.prefetch(), 128);
  assert_eq!(config.failure_mode(), FailureMode::FailFast);
  assert!(config.validate().is_ok());
}

#[test]
fn builders_update_each_field() {
  let config =
    FanInConfig::default().with_concurrency(2).with_prefetch(u64::MAX).with_failure_mode(FailureMode::CollectFailures);

  assert_eq!(config, FanInConfig::new(2, u64::MAX, FailureMode::CollectFailures));
  assert!(config.failure_mode().collects());
}

#[test]
fn zero_values_are_rejected_by_name() {
  let zero_concurrency = FanInConfig::default().with_concurrency(0).validate();
  let zero_prefetch = FanInConfig::default().with_prefetch(0).validate();

  assert!(matches!(zero_concurrency, Err(StreamError::InvalidArgument { name: "concurrency", .. })));
  assert!(matches!(zero_prefetch, Err(StreamError::InvalidArgument { name: "prefetch", .. })));
}

#[test]
fn replenish_after_three_quarters_of_the_prefetch() {
  assert_eq!(FanInConfig::default().with_prefetch(128).replenish_threshold(), 96);
  assert_eq!(FanInConfig::default().with_prefetch(1).replenish_threshold(), 1);
  assert_eq!(FanInConfig::default().with_prefetch(u64::MAX).replenish_threshold(), u64::MAX);
}
