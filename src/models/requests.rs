//! Request DTOs for the log server API
//!
//! Defines the structure of incoming query parameters.

use serde::{Deserialize, Serialize};

use crate::service::is_plain_file_name;

/// Query parameters for listing log lines (GET /logs)
///
/// # Fields
/// - `fileName`: Log file name relative to the log directory. When absent the
///   server falls back to `syslog` or `messages`.
/// - `searchTerm`: Optional case-insensitive substring filter
/// - `limit`: Maximum number of lines to return
/// - `offset`: Number of matching lines to skip, counted from the newest line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLogsRequest {
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub search_term: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<u64>,
}

impl ListLogsRequest {
    /// Creates a request for `file_name` with every other field defaulted.
    pub fn for_file(file_name: impl Into<String>) -> Self {
        Self {
            file_name: Some(file_name.into()),
            ..Self::default()
        }
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self, max_limit: usize) -> Option<String> {
        if let Some(limit) = self.limit {
            if limit < 1 || limit > max_limit {
                return Some(format!("Limit must be between 1 and {}", max_limit));
            }
        }
        if let Some(name) = self.file_name() {
            if !is_plain_file_name(name) {
                return Some(format!(
                    "fileName '{}' must name a file inside the log directory",
                    name
                ));
            }
        }
        None
    }

    /// File name with surrounding whitespace removed; blank counts as absent.
    pub fn file_name(&self) -> Option<&str> {
        non_blank(self.file_name.as_deref())
    }

    /// Search term as given; blank counts as absent.
    pub fn search_term(&self) -> Option<&str> {
        self.search_term
            .as_deref()
            .filter(|term| !term.trim().is_empty())
    }

    /// Search term lowercased for case-insensitive matching.
    pub fn search_term_lower(&self) -> Option<String> {
        self.search_term().map(str::to_lowercase)
    }

    pub fn offset(&self) -> u64 {
        self.offset.unwrap_or(0)
    }

    pub fn limit_or(&self, default_limit: usize) -> usize {
        self.limit.unwrap_or(default_limit)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
