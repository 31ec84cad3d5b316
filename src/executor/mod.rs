//! Executor Module
//!
//! Bounds per-request latency and propagates cancellation into running work.

mod timeout;

pub use timeout::TimeoutExecutor;
