/// Breaches of the subscription protocol detected by operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolViolation {
  /// `request(0)` was issued.
  #[error("request amount must be greater than zero")]
  NonPositiveRequest,
  /// `request` was issued before a subscription handle was available.
  #[error("request issued before a subscription was established")]
  RequestBeforeSubscribe,
  /// An item or terminal signal arrived before `on_subscribe`.
  #[error("signal received before on_subscribe")]
  SignalBeforeSubscribe,
}
