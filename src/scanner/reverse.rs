//! Reverse Chunked Scanner
//!
//! Reads a log file from its end towards its start in fixed-size windows and
//! collects the newest lines matching an optional filter. Peak memory is one
//! window plus the longest line, regardless of file size.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{LogError, Result};
use crate::scanner::{LogPage, ScanOutcome};

/// Default backward read window in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

// == Reverse Scanner ==
/// Stateless backward scanner; one instance can serve any number of scans.
#[derive(Debug, Clone, Copy)]
pub struct ReverseScanner {
    chunk_size: usize,
}

impl Default for ReverseScanner {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl ReverseScanner {
    /// Creates a scanner reading `chunk_size` bytes per window (at least 1).
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    // == Scan File ==
    /// Opens `path` and scans it. See [`scan`](Self::scan).
    ///
    /// # Errors
    /// - [`LogError::NotFound`] if the file does not exist
    /// - [`LogError::Io`] for any other open or read failure
    pub fn scan_file(
        &self,
        path: &Path,
        search_term: Option<&str>,
        limit: usize,
        offset: u64,
        cancel: &CancellationToken,
    ) -> Result<ScanOutcome> {
        let file = File::open(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => {
                LogError::NotFound(format!("File {} does not exist", path.display()))
            }
            _ => LogError::Io(err),
        })?;

        self.scan(file, search_term, limit, offset, cancel)
    }

    // == Scan ==
    /// Walks `reader` backwards and returns up to `limit` matching lines,
    /// newest first, after skipping the `offset` newest matches.
    ///
    /// `search_term` must already be lowercased; `None` or an empty term
    /// matches every line. `cancel` is checked before every window and a
    /// cancelled scan returns [`ScanOutcome::Aborted`].
    pub fn scan<R: Read + Seek>(
        &self,
        mut reader: R,
        search_term: Option<&str>,
        limit: usize,
        offset: u64,
        cancel: &CancellationToken,
    ) -> Result<ScanOutcome> {
        let mut collector = PageCollector::new(search_term, limit, offset);
        let mut window = vec![0u8; self.chunk_size];
        // Bytes of the line being rebuilt, in reverse order
        let mut pending: Vec<u8> = Vec::new();

        let mut position = reader.seek(SeekFrom::End(0))?;
        while position > 0 {
            if cancel.is_cancelled() {
                debug!("Scan cancelled with {} bytes left unread", position);
                return Ok(ScanOutcome::Aborted(collector.into_page()));
            }

            let len = position.min(self.chunk_size as u64) as usize;
            position -= len as u64;
            reader.seek(SeekFrom::Start(position))?;
            reader.read_exact(&mut window[..len])?;

            for &byte in window[..len].iter().rev() {
                if byte != b'\n' {
                    pending.push(byte);
                    continue;
                }
                if pending.is_empty() {
                    continue;
                }
                pending.reverse();
                let flow = collector.offer(&pending);
                pending.clear();
                if flow == Flow::Stop {
                    return Ok(ScanOutcome::Complete(collector.into_page()));
                }
            }
        }

        // The first physical line has no newline before it
        if !pending.is_empty() {
            pending.reverse();
            collector.offer(&pending);
        }

        Ok(ScanOutcome::Complete(collector.into_page()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

// == Page Collector ==
/// Applies filter, offset and limit to lines offered newest first.
struct PageCollector<'a> {
    search_term: Option<&'a str>,
    limit: usize,
    offset: u64,
    skipped: u64,
    lines: Vec<String>,
    has_more: bool,
}

impl<'a> PageCollector<'a> {
    fn new(search_term: Option<&'a str>, limit: usize, offset: u64) -> Self {
        Self {
            search_term: search_term.filter(|term| !term.is_empty()),
            limit,
            offset,
            skipped: 0,
            lines: Vec::with_capacity(limit.min(1024)),
            has_more: false,
        }
    }

    fn offer(&mut self, raw: &[u8]) -> Flow {
        let line = String::from_utf8_lossy(raw);

        if let Some(term) = self.search_term {
            if !line.to_lowercase().contains(term) {
                return Flow::Continue;
            }
        }

        if self.skipped < self.offset {
            self.skipped += 1;
            return Flow::Continue;
        }

        if self.lines.len() < self.limit {
            self.lines.push(line.trim_end().to_string());
            return Flow::Continue;
        }

        self.has_more = true;
        Flow::Stop
    }

    fn into_page(self) -> LogPage {
        debug!("Number of log lines retrieved: {}", self.lines.len());
        LogPage {
            lines: self.lines,
            has_more: self.has_more,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    const SAMPLE: &str = "1 ERROR a\n2 INFO b\n3 ERROR c\n4 DEBUG d\n5 ERROR e\n";

    fn scan_with(
        chunk_size: usize,
        content: &str,
        term: Option<&str>,
        limit: usize,
        offset: u64,
    ) -> LogPage {
        ReverseScanner::new(chunk_size)
            .scan(
                Cursor::new(content.as_bytes().to_vec()),
                term,
                limit,
                offset,
                &CancellationToken::new(),
            )
            .unwrap()
            .into_page()
            .unwrap()
    }

    fn scan(content: &str, term: Option<&str>, limit: usize, offset: u64) -> LogPage {
        scan_with(DEFAULT_CHUNK_SIZE, content, term, limit, offset)
    }

    #[test]
    fn test_filtered_scan_newest_first() {
        for chunk_size in [1, 3, 7, DEFAULT_CHUNK_SIZE] {
            let page = scan_with(chunk_size, SAMPLE, Some("error"), 100, 0);
            assert_eq!(page.lines, vec!["5 ERROR e", "3 ERROR c", "1 ERROR a"]);
            assert!(!page.has_more, "chunk size {}", chunk_size);
        }
    }

    #[test]
    fn test_pagination_reaches_first_physical_line() {
        let first = scan(SAMPLE, Some("error"), 1, 0);
        assert_eq!(first.lines, vec!["5 ERROR e"]);
        assert!(first.has_more);

        let second = scan(SAMPLE, Some("error"), 1, 1);
        assert_eq!(second.lines, vec!["3 ERROR c"]);
        assert!(second.has_more);

        let third = scan(SAMPLE, Some("error"), 1, 2);
        assert_eq!(third.lines, vec!["1 ERROR a"]);
        assert!(!third.has_more);
    }

    #[test]
    fn test_has_more_when_only_first_line_remains() {
        let page = scan(SAMPLE, Some("error"), 2, 0);
        assert_eq!(page.lines, vec!["5 ERROR e", "3 ERROR c"]);
        assert!(page.has_more);
    }

    #[test]
    fn test_first_line_respects_offset() {
        // Without a trailing newline every line but the last is "first" at some point
        let content = "a\nb\nc";
        assert_eq!(scan(content, None, 10, 2).lines, vec!["a"]);
        assert_eq!(scan(content, None, 10, 3).lines, Vec::<String>::new());
    }

    #[test]
    fn test_unfiltered_scan() {
        let page = scan(SAMPLE, None, 2, 0);
        assert_eq!(page.lines, vec!["5 ERROR e", "4 DEBUG d"]);
        assert!(page.has_more);
    }

    #[test]
    fn test_empty_term_matches_everything() {
        assert_eq!(scan(SAMPLE, Some(""), 100, 0).lines.len(), 5);
    }

    #[test]
    fn test_empty_file() {
        for (limit, offset) in [(1, 0), (100, 0), (5, 10)] {
            let page = scan("", Some("error"), limit, offset);
            assert!(page.lines.is_empty());
            assert!(!page.has_more);
        }
    }

    #[test]
    fn test_offset_past_all_matches() {
        let page = scan(SAMPLE, Some("error"), 10, 3);
        assert!(page.lines.is_empty());
        assert!(!page.has_more);
    }

    #[test]
    fn test_blank_lines_and_trailing_newlines_are_skipped() {
        let page = scan("\n\nfirst\n\n\nsecond\n\n", None, 10, 0);
        assert_eq!(page.lines, vec!["second", "first"]);
    }

    #[test]
    fn test_crlf_and_trailing_whitespace_trimmed() {
        let page = scan("  indented\r\nnext   \r\n", None, 10, 0);
        assert_eq!(page.lines, vec!["next", "  indented"]);
    }

    #[test]
    fn test_case_insensitive_match() {
        let page = scan("Disk FULL\nok\nfull stop\n", Some("full"), 10, 0);
        assert_eq!(page.lines, vec!["full stop", "Disk FULL"]);
    }

    #[test]
    fn test_line_longer_than_window() {
        let long = "x".repeat(10_000);
        let content = format!("head\n{}\ntail\n", long);
        let page = scan_with(64, &content, None, 3, 0);
        assert_eq!(page.lines, vec!["tail".to_string(), long, "head".to_string()]);
    }

    #[test]
    fn test_multibyte_utf8_split_across_windows() {
        let content = "héllo wörld\nñandú ERROR\n";
        for chunk_size in 1..8 {
            let page = scan_with(chunk_size, content, Some("error"), 10, 0);
            assert_eq!(page.lines, vec!["ñandú ERROR"]);
        }
        assert_eq!(scan_with(1, content, Some("wörld"), 10, 0).lines, vec!["héllo wörld"]);
    }

    #[test]
    fn test_cancelled_scan_is_aborted() {
        let token = CancellationToken::new();
        token.cancel();

        let outcome = ReverseScanner::new(4)
            .scan(Cursor::new(SAMPLE.as_bytes()), None, 10, 0, &token)
            .unwrap();

        assert!(outcome.is_aborted());
        assert!(matches!(outcome.into_page(), Err(LogError::Cancelled)));
    }

    #[test]
    fn test_cancelled_empty_file_is_complete() {
        // Nothing to read means no window boundary to observe the token at
        let token = CancellationToken::new();
        token.cancel();

        let outcome = ReverseScanner::default()
            .scan(Cursor::new(Vec::new()), None, 10, 0, &token)
            .unwrap();
        assert_eq!(outcome, ScanOutcome::Complete(LogPage::default()));
    }

    #[test]
    fn test_scan_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let outcome = ReverseScanner::new(5)
            .scan_file(file.path(), Some("info"), 10, 0, &CancellationToken::new())
            .unwrap();

        assert_eq!(outcome.into_page().unwrap().lines, vec!["2 INFO b"]);
    }

    #[test]
    fn test_scan_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = ReverseScanner::default().scan_file(
            &dir.path().join("missing.log"),
            None,
            10,
            0,
            &CancellationToken::new(),
        );
        assert!(matches!(result, Err(LogError::NotFound(_))));
    }

    #[test]
    fn test_zero_chunk_size_is_clamped() {
        assert_eq!(ReverseScanner::new(0).chunk_size(), 1);
    }
}
