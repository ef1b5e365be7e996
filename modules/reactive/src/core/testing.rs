//! Test utilities for operator verification.

mod sequence_source;
mod test_sink_probe;
mod test_source_probe;
mod test_subscription;

pub use sequence_source::SequenceSource;
pub use test_sink_probe::TestSinkProbe;
pub use test_source_probe::TestSourceProbe;
pub use test_subscription::TestSubscription;
