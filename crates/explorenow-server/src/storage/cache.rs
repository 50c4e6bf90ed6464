//! In-memory response cache with TTL support (DashMap backed)
//!
//! Entries expire lazily on read; a background sweeper bounds memory for
//! keys that are written once and never read again.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

/// Default lifetime of catalog entries
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// How often the sweeper scans for expired entries
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

pub struct TtlCache<V> {
    data: DashMap<String, CacheEntry<V>>,
    /// Bumped by every invalidation
    generation: AtomicU64,
}

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

impl<V: Clone + Send + Sync + 'static> TtlCache<V> {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
            generation: AtomicU64::new(0),
        }
    }

    /// Get a live value; an expired entry is evicted and reported absent.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let entry = self.data.get(key)?;
        if entry.is_expired(now) {
            drop(entry);
            self.data.remove_if(key, |_, entry| entry.is_expired(now));
            return None;
        }
        Some(entry.value.clone())
    }

    /// Store a value that expires `ttl` from now, replacing any previous entry.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.data.insert(
            key.into(),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Snapshot to pass to `set_if_unchanged` after a backend read.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Store a value read from the backend, unless something was invalidated
    /// since `generation` was taken. Returns whether the value was stored.
    pub fn set_if_unchanged(
        &self,
        key: impl Into<String>,
        value: V,
        ttl: Duration,
        generation: u64,
    ) -> bool {
        // The entry guard holds the shard lock, so a concurrent `remove` of
        // this key either sees the insert or bumps the generation first.
        let entry = self.data.entry(key.into());
        if self.generation() != generation {
            return false;
        }
        entry.insert(CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        });
        true
    }

    /// Delete a key from cache
    pub fn remove(&self, key: &str) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.data.remove(key);
    }

    pub fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.data.clear();
    }

    /// Number of stored entries, expired or not
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.data.len();
        self.data.retain(|_, entry| !entry.is_expired(now));
        before.saturating_sub(self.data.len())
    }

    /// Run `purge_expired` every `period` until the cache is dropped.
    pub fn spawn_sweeper(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let cache: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                let Some(cache) = cache.upgrade() else {
                    break;
                };
                let removed = cache.purge_expired();
                if removed > 0 {
                    debug!("Cache sweep removed {} expired entries", removed);
                }
            }
        })
    }
}

impl<V: Clone + Send + Sync + 'static> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_basic_operations() {
        let cache = TtlCache::new();

        cache.set("key1", vec![1, 2, 3], DEFAULT_TTL);
        assert_eq!(cache.get("key1"), Some(vec![1, 2, 3]));

        assert_eq!(cache.get("nonexistent"), None);

        cache.remove("key1");
        assert_eq!(cache.get("key1"), None);
    }

    #[tokio::test]
    async fn test_set_overwrites_value_and_expiry() {
        tokio::time::pause();
        let cache = TtlCache::new();

        cache.set("hotels:all", "old", Duration::from_secs(1));
        cache.set("hotels:all", "new", Duration::from_secs(10));
        tokio::time::advance(Duration::from_secs(5)).await;
        assert_eq!(cache.get("hotels:all"), Some("new"));
    }

    #[tokio::test]
    async fn test_ttl_boundary() {
        tokio::time::pause();
        let cache = TtlCache::new();

        cache.set("hotel:1", 1u8, DEFAULT_TTL);
        tokio::time::advance(DEFAULT_TTL - Duration::from_millis(1)).await;
        assert_eq!(cache.get("hotel:1"), Some(1));

        // Absent exactly at the expiry instant.
        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(cache.get("hotel:1"), None);
        assert!(cache.is_empty(), "expired entry is evicted on read");
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = TtlCache::new();
        for i in 0..5 {
            cache.set(format!("hotel:{}", i), i, DEFAULT_TTL);
        }

        cache.clear();
        for i in 0..5 {
            assert_eq!(cache.get(&format!("hotel:{}", i)), None);
        }
    }

    #[tokio::test]
    async fn test_fill_after_invalidation_is_dropped() {
        let cache = TtlCache::new();

        // A read starts, then a write invalidates the list before it finishes.
        let generation = cache.generation();
        cache.remove("hotels:all");
        assert!(!cache.set_if_unchanged("hotels:all", "stale", DEFAULT_TTL, generation));
        assert_eq!(cache.get("hotels:all"), None);

        let generation = cache.generation();
        cache.clear();
        assert!(!cache.set_if_unchanged("hotel:1", "stale", DEFAULT_TTL, generation));

        let generation = cache.generation();
        assert!(cache.set_if_unchanged("hotels:all", "fresh", DEFAULT_TTL, generation));
        assert_eq!(cache.get("hotels:all"), Some("fresh"));
    }

    #[tokio::test]
    async fn test_purge_expired_keeps_live_entries() {
        tokio::time::pause();
        let cache = TtlCache::new();

        cache.set("short", 1, Duration::from_secs(1));
        cache.set("long", 2, Duration::from_secs(600));
        tokio::time::advance(Duration::from_secs(2)).await;

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("long"), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_removes_unread_entries() {
        let cache = Arc::new(TtlCache::new());
        let sweeper = cache.spawn_sweeper(SWEEP_INTERVAL);

        // Each cycle writes a fresh key that is never read again.
        for cycle in 0..5 {
            cache.set(format!("abandoned:{}", cycle), cycle, Duration::from_secs(1));
            tokio::time::sleep(SWEEP_INTERVAL + Duration::from_secs(1)).await;
            assert!(cache.len() <= 1, "cycle {}: {} entries", cycle, cache.len());
        }

        tokio::time::sleep(SWEEP_INTERVAL * 2).await;
        assert!(cache.is_empty());
        sweeper.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_stops_when_cache_dropped() {
        let cache = Arc::new(TtlCache::<u8>::new());
        let sweeper = cache.spawn_sweeper(SWEEP_INTERVAL);
        drop(cache);

        tokio::time::sleep(SWEEP_INTERVAL * 2).await;
        assert!(sweeper.is_finished());
    }
}
