//! Service Module
//!
//! Composes the cache, executor and scanner into the list-logs query, and
//! maps requested file names onto the log directory.

pub mod files;
mod log_service;

pub use files::{is_plain_file_name, list_log_files, resolve_log_file, DEFAULT_LOG_FILES};
pub use log_service::LogService;
