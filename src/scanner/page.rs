//! Scan results.

use crate::error::{LogError, Result};

/// One page of matching lines, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogPage {
    pub lines: Vec<String>,
    /// At least one more matching line exists past this page
    pub has_more: bool,
}

/// How a scan ended.
///
/// An aborted scan carries whatever it had collected when it noticed the
/// cancellation, which is never a valid answer to the original request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Complete(LogPage),
    Aborted(LogPage),
}

impl ScanOutcome {
    pub fn is_aborted(&self) -> bool {
        matches!(self, ScanOutcome::Aborted(_))
    }

    /// Returns the page of a complete scan, or [`LogError::Cancelled`].
    pub fn into_page(self) -> Result<LogPage> {
        match self {
            ScanOutcome::Complete(page) => Ok(page),
            ScanOutcome::Aborted(_) => Err(LogError::Cancelled),
        }
    }
}
