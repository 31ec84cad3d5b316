//! Scanner Module
//!
//! Backward, window-by-window reading of log files with filtering and
//! newest-first pagination.

mod page;
mod reverse;


pub use page::{LogPage, ScanOutcome};
pub use reverse::{ReverseScanner, DEFAULT_CHUNK_SIZE};
