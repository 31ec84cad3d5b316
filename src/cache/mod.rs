//! Cache Module
//!
//! Bounded in-memory caching of list responses with TTL expiration and LRU eviction.

mod entry;
mod lru;
mod policy;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use policy::CachePolicy;
pub use stats::CacheStats;
pub use store::CacheStore;

use crate::models::ListLogsResponse;

/// Response cache shared between request handlers and the cleanup task.
pub type SharedCache = Arc<RwLock<CacheStore<ListLogsResponse>>>;
