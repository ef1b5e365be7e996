#[cfg(feature = "tokio-executor")]
mod tokio_executor;

#[cfg(feature = "tokio-executor")]
pub use tokio_executor::TokioExecutor;
