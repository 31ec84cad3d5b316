//! Query orchestration: cache lookup, deadline-bounded scan, cache fill.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::info;

use crate::cache::{CachePolicy, CacheStats, CacheStore, SharedCache};
use crate::config::Config;
use crate::error::{LogError, Result};
use crate::executor::TimeoutExecutor;
use crate::models::{ListFilesResponse, ListLogsRequest, ListLogsResponse};
use crate::scanner::ReverseScanner;
use crate::service::files::{list_log_files, resolve_log_file};

// == Log Service ==
/// Answers list requests for files under one log directory.
///
/// Cheap to clone; clones share the cache and the executor.
#[derive(Debug, Clone)]
pub struct LogService {
    log_dir: Arc<PathBuf>,
    cache: SharedCache,
    policy: CachePolicy,
    executor: TimeoutExecutor,
    scanner: ReverseScanner,
    default_limit: usize,
    max_limit: usize,
    request_timeout: Duration,
}

impl LogService {
    /// Creates a service with a fresh cache sized from `config`.
    pub fn from_config(config: &Config) -> Self {
        let ttl = chrono::Duration::from_std(config.cache_ttl_duration())
            .unwrap_or(chrono::TimeDelta::MAX);
        let cache = Arc::new(RwLock::new(CacheStore::new(config.cache_max_entries, ttl)));
        Self::with_cache(config, cache)
    }

    /// Creates a service around an existing cache.
    pub fn with_cache(config: &Config, cache: SharedCache) -> Self {
        Self {
            log_dir: Arc::new(config.log_dir.clone()),
            cache,
            policy: CachePolicy::new(config.cache_offset_threshold, config.default_limit),
            executor: TimeoutExecutor::new(),
            scanner: ReverseScanner::new(config.chunk_size),
            default_limit: config.default_limit,
            max_limit: config.max_limit,
            request_timeout: config.request_timeout_duration(),
        }
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    pub fn executor(&self) -> &TimeoutExecutor {
        &self.executor
    }

    // == List Logs ==
    /// Returns one page of matching lines, newest first.
    ///
    /// Cacheable requests are answered from the cache when possible. On a
    /// miss the file is resolved and scanned on the blocking pool under the
    /// request deadline, and a complete result is cached. Results of timed
    /// out or cancelled scans are never returned or cached.
    pub async fn list_logs(&self, request: ListLogsRequest) -> Result<ListLogsResponse> {
        if let Some(msg) = request.validate(self.max_limit) {
            return Err(LogError::InvalidRequest(msg));
        }

        let limit = request.limit_or(self.default_limit);
        let offset = request.offset();
        let description = format!(
            "file: {}, searchTerm: {}, limit: {}, offset: {}",
            request.file_name().unwrap_or("<default>"),
            request.search_term().unwrap_or(""),
            limit,
            offset
        );

        let cache_key = self
            .policy
            .is_cacheable(&request)
            .then(|| self.policy.cache_key(&request));

        if let Some(key) = &cache_key {
            if let Some(cached) = self.cache.write().await.get(key) {
                info!(
                    "Cache hit for request {}, returning {} lines",
                    description,
                    cached.logs.len()
                );
                return Ok(cached);
            }
        }

        info!("Received list logs request: {}", description);
        let started = Instant::now();

        let log_dir = Arc::clone(&self.log_dir);
        let file_name = request.file_name().map(str::to_string);
        let search_term = request.search_term_lower();
        let scanner = self.scanner;

        let page = self
            .executor
            .run_with_timeout(
                move |cancel| {
                    let path = resolve_log_file(&log_dir, file_name.as_deref())?;
                    scanner
                        .scan_file(&path, search_term.as_deref(), limit, offset, &cancel)?
                        .into_page()
                },
                self.request_timeout,
            )
            .await?;

        info!(
            "Logs for request {} took {} ms",
            description,
            started.elapsed().as_millis()
        );

        let response = ListLogsResponse::from_page(page, offset, limit);

        if let Some(key) = cache_key {
            info!("Caching response for request {}", description);
            self.cache.write().await.put(key, response.clone());
        }

        Ok(response)
    }

    // == List Files ==
    /// Lists the readable log files in the log directory.
    pub async fn list_files(&self) -> Result<ListFilesResponse> {
        let log_dir = Arc::clone(&self.log_dir);
        let files = tokio::task::spawn_blocking(move || list_log_files(&log_dir))
            .await
            .map_err(|err| LogError::Internal(format!("File listing failed: {}", err)))??;

        Ok(ListFilesResponse { files })
    }

    /// Current cache statistics.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }
}
