//! Cache Policy Module
//!
//! Decides which list requests are worth caching and how they are keyed.

use crate::models::ListLogsRequest;

/// Separator between key fields.
const KEY_DELIMITER: char = '|';

// == Cache Policy ==
/// Cacheability rule and key normalization for list requests.
///
/// Shallow unfiltered reads of a file's tail are cheap, so only filtered
/// requests or requests paging deeper than `offset_threshold` are cached.
#[derive(Debug, Clone, Copy)]
pub struct CachePolicy {
    /// Unfiltered requests are cached only when their offset exceeds this
    pub offset_threshold: u64,
    /// Limit assumed for requests that do not carry one
    pub default_limit: usize,
}

impl CachePolicy {
    pub fn new(offset_threshold: u64, default_limit: usize) -> Self {
        Self {
            offset_threshold,
            default_limit,
        }
    }

    // == Is Cacheable ==
    /// True when the request has a non-blank search term or pages past the
    /// offset threshold.
    pub fn is_cacheable(&self, request: &ListLogsRequest) -> bool {
        request.search_term().is_some() || request.offset() > self.offset_threshold
    }

    // == Cache Key ==
    /// Builds `len:file|len:term|offset|limit` from the normalized request
    /// fields.
    ///
    /// The term is lowercased because matching ignores case, and omitted
    /// offset/limit take the same defaults the scan uses. Text fields carry
    /// their byte length, so a delimiter inside a file name or term cannot
    /// make two different requests share a key.
    pub fn cache_key(&self, request: &ListLogsRequest) -> String {
        let file = request.file_name().unwrap_or_default();
        let term = request.search_term_lower().unwrap_or_default();
        format!(
            "{file_len}:{file}{d}{term_len}:{term}{d}{offset}{d}{limit}",
            file_len = file.len(),
            term_len = term.len(),
            offset = request.offset(),
            limit = request.limit_or(self.default_limit),
            d = KEY_DELIMITER,
        )
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::new(100, 100)
    }
}
