/// Composite failure definition.
mod composite_failure;
/// Demand model types.
mod demand;
/// Atomic outstanding-request counter.
mod demand_counter;
/// Emit-on operator.
mod emit_on;
/// Placeholder subscription for terminal-only deliveries.
mod empty_subscription;
/// Executor abstraction.
mod executor;
/// Failure payload definition.
mod failure_cause;
/// Failure propagation modes for fan-in.
mod failure_mode;
/// Merge/concatenate operator.
mod fan_in;
/// Fan-in configuration.
mod fan_in_config;
/// Skip-until gate state.
mod gate_state;
/// Ignore-elements operator.
mod ignore_elements;
/// Inline executor.
mod inline_executor;
/// Map operator.
mod map;
/// Shared decorator state for operators.
mod operator_core;
/// Protocol violation kinds.
mod protocol_violation;
/// Publisher trait.
mod publisher;
/// Fluent operator constructors.
mod publisher_ext;
/// Signal serializing subscriber wrapper.
mod serialized_subscriber;
/// Signal enum.
mod signal;
/// Skip-until operator.
mod skip_until;
/// Stream error definitions.
mod stream_error;
/// Subscriber trait.
mod subscriber;
/// Subscription trait.
mod subscription;
/// Set-once upstream subscription cell.
mod subscription_cell;
/// Test utilities for operator verification.
pub mod testing;
/// Argument validation helpers.
mod validate_positive_argument;

pub use composite_failure::CompositeFailure;
pub use demand::Demand;
pub use demand_counter::DemandCounter;
pub use emit_on::EmitOn;
pub use empty_subscription::EmptySubscription;
pub use executor::Executor;
pub use failure_cause::FailureCause;
pub use failure_mode::FailureMode;
pub use fan_in::FanIn;
pub use fan_in_config::FanInConfig;
pub use gate_state::GateState;
pub use ignore_elements::IgnoreElements;
pub use inline_executor::InlineExecutor;
pub use map::Map;
pub use operator_core::OperatorCore;
pub use protocol_violation::ProtocolViolation;
pub use publisher::Publisher;
pub use publisher_ext::PublisherExt;
pub use serialized_subscriber::SerializedSubscriber;
pub use signal::Signal;
pub use skip_until::SkipUntil;
pub use stream_error::StreamError;
pub use subscriber::Subscriber;
pub use subscription::Subscription;
pub use subscription_cell::SubscriptionCell;
pub use validate_positive_argument::validate_positive_argument;
