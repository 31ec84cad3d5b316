//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory that log file names are resolved against
    pub log_dir: PathBuf,
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of responses the query cache can hold
    pub cache_max_entries: usize,
    /// Cache entry lifetime in seconds, also the sweep period
    pub cache_ttl: u64,
    /// Unfiltered requests are cached only past this offset
    pub cache_offset_threshold: u64,
    /// Limit applied when a request does not carry one
    pub default_limit: usize,
    /// Largest limit a request may ask for
    pub max_limit: usize,
    /// Per-query deadline in milliseconds
    pub request_timeout_ms: u64,
    /// Size of each backward read window in bytes
    pub chunk_size: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `LOG_DIR` - Log directory (default: /var/log)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_MAX_ENTRIES` - Maximum cached responses (default: 100)
    /// - `CACHE_TTL` - Cache TTL in seconds (default: 120)
    /// - `CACHE_OFFSET_THRESHOLD` - Offset above which unfiltered queries are cached (default: 100)
    /// - `DEFAULT_LIMIT` - Lines returned when no limit is given (default: 100)
    /// - `MAX_LIMIT` - Upper bound on the limit parameter (default: 1000)
    /// - `REQUEST_TIMEOUT_MS` - Per-query deadline in milliseconds (default: 10000)
    /// - `CHUNK_SIZE` - Backward read window in bytes (default: 4096)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_dir: env::var("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cache_max_entries: env_or("CACHE_MAX_ENTRIES", defaults.cache_max_entries),
            cache_ttl: env_or("CACHE_TTL", defaults.cache_ttl),
            cache_offset_threshold: env_or(
                "CACHE_OFFSET_THRESHOLD",
                defaults.cache_offset_threshold,
            ),
            default_limit: env_or("DEFAULT_LIMIT", defaults.default_limit),
            max_limit: env_or("MAX_LIMIT", defaults.max_limit),
            request_timeout_ms: env_or("REQUEST_TIMEOUT_MS", defaults.request_timeout_ms),
            chunk_size: env_or::<usize>("CHUNK_SIZE", defaults.chunk_size).max(1),
        }
    }

    /// Cache TTL as a duration.
    pub fn cache_ttl_duration(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// Per-query deadline as a duration.
    pub fn request_timeout_duration(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("/var/log"),
            server_port: 3000,
            cache_max_entries: 100,
            cache_ttl: 120,
            cache_offset_threshold: 100,
            default_limit: 100,
            max_limit: 1000,
            request_timeout_ms: 10_000,
            chunk_size: 4096,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
