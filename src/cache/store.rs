//! Cache Store Module
//!
//! Bounded cache engine combining HashMap storage with LRU tracking and TTL expiration.

use std::collections::HashMap;

use chrono::Duration;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, LruTracker};

// == Cache Store ==
/// Bounded key-value store with LRU eviction and a fixed TTL.
///
/// Absence is never an error: lookups return `None` for missing and expired
/// keys alike.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// LRU use tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Lifetime given to every inserted entry
    ttl: Duration,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and TTL.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the cache can hold
    /// * `ttl` - Lifetime of each entry from the moment it is stored
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries,
            ttl,
        }
    }

    // == Put ==
    /// Stores a value under `key` with a fresh expiry.
    ///
    /// Overwriting an existing key resets its expiry. When a new key would
    /// push the store past capacity the least recently used entry goes first,
    /// whether or not it has expired.
    pub fn put(&mut self, key: String, value: V) {
        let ttl = self.ttl;
        self.put_with_ttl(key, value, ttl);
    }

    /// Like [`put`](Self::put) with an explicit lifetime for this one entry.
    pub fn put_with_ttl(&mut self, key: String, value: V, ttl: Duration) {
        if self.max_entries == 0 {
            return;
        }

        if !self.entries.contains_key(&key) {
            while self.entries.len() >= self.max_entries {
                let Some(evicted) = self.lru.evict_oldest() else {
                    break;
                };
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                debug!("Evicted least recently used cache entry: {}", evicted);
            }
        }

        self.entries.insert(key.clone(), CacheEntry::new(value, ttl));
        self.lru.touch(&key);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns a clone of the value for `key` if present and not expired.
    ///
    /// Expired entries are removed on the spot. A hit refreshes the entry's
    /// LRU position but not its expiry.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let expired = match self.entries.get(key) {
            None => {
                self.stats.record_miss();
                return None;
            }
            Some(entry) => entry.is_expired(),
        };

        if expired {
            self.remove(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.lru.touch(key);
        self.entries.get(key).map(|entry| {
            debug!("Cache hit for {}, expires in {} ms", key, entry.ttl_remaining_ms());
            entry.value.clone()
        })
    }

    // == Evict Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn evict_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            self.remove(&key);
        }

        self.stats.record_expirations(count);
        count
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
        self.lru.remove(key);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns true if `key` is stored, expired or not, without touching it.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Lifetime given to entries stored with [`put`](Self::put).
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
