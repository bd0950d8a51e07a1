//! In-memory cache provider backed by a concurrent hash map.
//!
//! Expiry uses `tokio::time::Instant`, so tests can drive TTL behaviour
//! with a paused clock and `tokio::time::advance`.

use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;

use roomhub_core::config::cache::MemoryCacheConfig;
use roomhub_core::result::AppResult;
use roomhub_core::traits::cache::CacheProvider;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}

/// In-memory cache provider for development and tests.
///
/// Entries are expired lazily on access; a sweep runs when the map grows
/// past the configured capacity.
#[derive(Debug)]
pub struct MemoryCacheProvider {
    entries: DashMap<String, Entry>,
    max_capacity: u64,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache provider.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            max_capacity: config.max_capacity,
        }
    }

    fn make_entry(value: &str, ttl: Option<Duration>) -> Entry {
        Entry {
            value: value.to_string(),
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        }
    }

    /// Drop expired entries when the map outgrows its capacity.
    fn sweep_if_full(&self) {
        if self.entries.len() as u64 > self.max_capacity {
            self.entries.retain(|_, entry| !entry.is_expired());
        }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired() {
                drop(entry);
                self.entries.remove(key);
                return Ok(None);
            }
            return Ok(Some(entry.value.clone()));
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()> {
        self.entries
            .insert(key.to_string(), Self::make_entry(value, ttl));
        self.sweep_if_full();
        Ok(())
    }

    async fn set_nx(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<bool> {
        // A present-but-expired entry does not block the insert.
        let mut inserted = false;
        let entry = self
            .entries
            .entry(key.to_string())
            .and_modify(|existing| {
                if existing.is_expired() {
                    *existing = Self::make_entry(value, ttl);
                    inserted = true;
                }
            })
            .or_insert_with(|| {
                inserted = true;
                Self::make_entry(value, ttl)
            });
        drop(entry);
        self.sweep_if_full();
        Ok(inserted)
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.get(key).await?.is_some())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> MemoryCacheProvider {
        MemoryCacheProvider::new(&MemoryCacheConfig::default())
    }

    #[tokio::test]
    async fn set_and_get_without_ttl() {
        let cache = provider();
        cache.set("k", "v", None).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some("v".to_string()));
        assert!(cache.exists("k").await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn entry_expires_after_ttl() {
        let cache = provider();
        cache
            .set("k", "v", Some(Duration::from_secs(60)))
            .await
            .unwrap();
        assert!(cache.exists("k").await.unwrap());

        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(cache.get("k").await.unwrap(), None);
        assert!(!cache.exists("k").await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn entry_without_ttl_never_expires() {
        let cache = provider();
        cache.set("k", "v", None).await.unwrap();

        tokio::time::advance(Duration::from_secs(86_400 * 365)).await;
        assert_eq!(cache.get("k").await.unwrap(), Some("v".to_string()));
    }

    #[tokio::test]
    async fn set_nx_respects_existing_key() {
        let cache = provider();
        assert!(cache.set_nx("k", "first", None).await.unwrap());
        assert!(!cache.set_nx("k", "second", None).await.unwrap());
        assert_eq!(cache.get("k").await.unwrap(), Some("first".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn set_nx_succeeds_after_expiry() {
        let cache = provider();
        assert!(
            cache
                .set_nx("k", "first", Some(Duration::from_secs(10)))
                .await
                .unwrap()
        );

        tokio::time::advance(Duration::from_secs(11)).await;
        assert!(cache.set_nx("k", "second", None).await.unwrap());
        assert_eq!(cache.get("k").await.unwrap(), Some("second".to_string()));
    }

    #[tokio::test]
    async fn delete_removes_entry() {
        let cache = provider();
        cache.set("k", "v", None).await.unwrap();
        cache.delete("k").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
    }
}
