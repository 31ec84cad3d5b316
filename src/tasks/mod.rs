//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Cache Cleanup: Sweeps expired cache entries once per TTL period

mod cleanup;

pub use cleanup::spawn_cleanup_task;
