//! Log Tail - A read-only log query server
//!
//! Serves the newest, optionally filtered lines of log files with stable
//! reverse pagination, a bounded TTL cache and per-request deadlines.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod executor;
pub mod models;
pub mod scanner;
pub mod service;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use service::LogService;
pub use tasks::spawn_cleanup_task;
