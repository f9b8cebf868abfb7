//! Response caching for search requests.
//!
//! Provides an LRU cache with TTL expiration for decoded search responses.
//! Thread-safe using `Mutex` for LRU operations.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use lru::LruCache;

use crate::config::CacheConfig;
use crate::response::SearchResponse;

/// A cached response with expiration tracking.
#[derive(Debug, Clone)]
struct CacheEntry {
    response: SearchResponse,
    created_at: Instant,
}

impl CacheEntry {
    fn new(response: SearchResponse) -> Self {
        Self {
            response,
            created_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Thread-safe LRU cache with TTL expiration for search responses.
///
/// - **LRU Eviction**: When the cache is full, the least recently used entry is evicted.
/// - **TTL Expiration**: Entries expire after the configured time-to-live.
/// - **Thread-Safe**: Uses `Mutex` for safe concurrent access.
///
/// Keys come from [`cache_key`], so bodies that differ only in whitespace
/// outside quoted strings share an entry.
pub struct ResponseCache {
    inner: Mutex<LruCache<String, CacheEntry>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResponseCache {
    /// Creates a new response cache with the given configuration.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_capacity(config.max_entries, config.ttl)
    }

    /// Creates a cache with custom capacity and TTL.
    pub fn with_capacity(max_entries: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(max_entries.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Gets a cached response by key.
    ///
    /// Expired entries are dropped and reported as a miss. On a hit the entry
    /// is promoted to most-recently-used.
    pub fn get(&self, key: &str) -> Option<SearchResponse> {
        let found = self.lookup(key);
        let counter = if found.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    fn lookup(&self, key: &str) -> Option<SearchResponse> {
        let mut cache = self.inner.lock().ok()?;

        if let Some(entry) = cache.get(key) {
            if entry.is_expired(self.ttl) {
                cache.pop(key);
                return None;
            }
            return Some(entry.response.clone());
        }

        None
    }

    /// Stores a response in the cache.
    pub fn set(&self, key: String, response: SearchResponse) {
        if let Ok(mut cache) = self.inner.lock() {
            cache.put(key, CacheEntry::new(response));
        }
    }

    /// Checks if a key exists in the cache (without affecting LRU order).
    ///
    /// Note: This doesn't check for expiration.
    pub fn contains(&self, key: &str) -> bool {
        match self.inner.lock() {
            Ok(cache) => cache.contains(key),
            _ => false,
        }
    }

    /// Returns the number of entries currently in the cache.
    ///
    /// Note: This may include expired entries that haven't been cleaned up yet.
    pub fn len(&self) -> usize {
        match self.inner.lock() {
            Ok(cache) => cache.len(),
            _ => 0,
        }
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all entries from the cache.
    pub fn clear(&self) {
        if let Ok(mut cache) = self.inner.lock() {
            cache.clear();
        }
    }

    /// Removes expired entries from the cache.
    pub fn cleanup_expired(&self) {
        if let Ok(mut cache) = self.inner.lock() {
            let ttl = self.ttl;
            let expired_keys: Vec<String> = cache
                .iter()
                .filter(|(_, entry)| entry.is_expired(ttl))
                .map(|(key, _)| key.clone())
                .collect();

            for key in expired_keys {
                cache.pop(&key);
            }
        }
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let (total, expired) = match self.inner.lock() {
            Ok(cache) => {
                let expired = cache
                    .iter()
                    .filter(|(_, entry)| entry.is_expired(self.ttl))
                    .count();
                (cache.len(), expired)
            }
            _ => (0, 0),
        };

        CacheStats {
            total_entries: total,
            expired_entries: expired,
            valid_entries: total.saturating_sub(expired),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        f.debug_struct("ResponseCache")
            .field("entries", &stats.total_entries)
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Statistics about the cache state.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Total number of entries in the cache.
    pub total_entries: usize,
    /// Number of expired entries (not yet cleaned up).
    pub expired_entries: usize,
    /// Number of valid (non-expired) entries.
    pub valid_entries: usize,
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that missed.
    pub misses: u64,
}

/// Builds the cache key for a search on `index` with `body`.
///
/// Whitespace outside double-quoted strings is dropped; quoted text is kept
/// verbatim, since values are compared exactly.
///
/// # Example
///
/// ```rust
/// use esquery_client::cache_key;
///
/// assert_eq!(
///     cache_key("person", r#"{ "query" :  { "term" : { "Name" : "a  b" } } } "#),
///     cache_key("person", r#"{"query":{"term":{"Name":"a  b"}}}"#),
/// );
/// ```
pub fn cache_key(index: &str, body: &str) -> String {
    let mut result = String::with_capacity(index.len() + body.len() + 1);
    result.push_str(index);
    result.push('\n');

    let mut in_quotes = false;
    for ch in body.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
        }
        if in_quotes || !ch.is_whitespace() {
            result.push(ch);
        }
    }

    result
}
