//! # Query cache: fetched resources keyed by name
//!
//! Every list and detail view reads through [`QueryCache`]. Keys are resource
//! names: `"properties"` for a collection, `"properties/5"` for one entity, and
//! `"orders?status=pending"` for a filtered collection.
//!
//! ## Invalidation
//!
//! [`QueryCache::invalidate`] drops the value stored under a key **and** under
//! every filtered variant of it (`key?...`), then bumps the key's generation.
//! Mutations call it synchronously right after the backend acknowledges
//! success, so the refetch it triggers can only ever follow the mutation.
//!
//! [`QueryCache::get_or_fetch`] registers its key before the request goes out
//! and remembers the generation it started from. It discards its result if the
//! key was invalidated while the request was in flight, including a first
//! fetch of a filtered variant invalidated through its base key, so a slow
//! stale response never overwrites a newer invalidation.
//!
//! Values are stored as `serde_json::Value`, so one cache serves every record
//! type. Clones share the same underlying map.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Default)]
struct CacheEntry {
    value: Option<serde_json::Value>,
    generation: u64,
}

#[derive(Clone, Debug, Default)]
pub struct QueryCache {
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
}

impl PartialEq for QueryCache {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key for a whole collection or a single entity of `resource`.
    pub fn key(resource: &str, id: Option<i64>) -> String {
        match id {
            Some(id) => format!("{resource}/{id}"),
            None => resource.to_string(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entries = self.lock();
        let value = entries.get(key)?.value.as_ref()?;
        match serde_json::from_value(value.clone()) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("cache entry {key} has unexpected shape: {e}");
                None
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().get(key).is_some_and(|e| e.value.is_some())
    }

    pub fn put<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(json) => {
                self.lock().entry(key.to_string()).or_default().value = Some(json);
            }
            Err(e) => tracing::warn!("could not cache {key}: {e}"),
        }
    }

    pub fn generation(&self, key: &str) -> u64 {
        self.lock().get(key).map(|e| e.generation).unwrap_or(0)
    }

    /// Register `key` so a later `invalidate` of it or of its base key bumps
    /// its generation, and return the generation it starts from.
    fn track(&self, key: &str) -> u64 {
        self.lock().entry(key.to_string()).or_default().generation
    }

    /// Drop `key` and its filtered variants.
    pub fn invalidate(&self, key: &str) {
        let variant_prefix = format!("{key}?");
        let mut entries = self.lock();
        entries.entry(key.to_string()).or_default();
        for (k, entry) in entries.iter_mut() {
            if k == key || k.starts_with(&variant_prefix) {
                entry.value = None;
                entry.generation += 1;
            }
        }
        tracing::debug!("invalidated cache key {key}");
    }

    pub fn clear(&self) {
        let mut entries = self.lock();
        for entry in entries.values_mut() {
            entry.value = None;
            entry.generation += 1;
        }
    }

    /// Return the cached value, or run `fetch` and cache what it returns.
    ///
    /// Errors are never cached.
    pub async fn get_or_fetch<T, E, F, Fut>(&self, key: &str, fetch: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.get(key) {
            return Ok(hit);
        }
        let started = self.track(key);
        let value = fetch().await?;
        if self.generation(key) == started {
            self.put(key, &value);
        } else {
            tracing::debug!("discarding stale response for {key}");
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_put_get_and_key_helpers() {
        let cache = QueryCache::new();
        assert_eq!(QueryCache::key("vendors", None), "vendors");
        assert_eq!(QueryCache::key("vendors", Some(3)), "vendors/3");

        cache.put("vendors", &vec![1, 2, 3]);
        assert_eq!(cache.get::<Vec<i32>>("vendors"), Some(vec![1, 2, 3]));
        assert!(cache.get::<Vec<i32>>("properties").is_none());
        assert!(cache.get::<String>("vendors").is_none());
    }

    #[test]
    fn test_invalidate_drops_filtered_variants_only() {
        let cache = QueryCache::new();
        cache.put("orders", &1);
        cache.put("orders?status=pending", &2);
        cache.put("orders/4", &3);
        cache.put("ordersx", &4);

        cache.invalidate("orders");
        assert!(!cache.contains("orders"));
        assert!(!cache.contains("orders?status=pending"));
        assert!(cache.contains("orders/4"));
        assert!(cache.contains("ordersx"));
        assert_eq!(cache.generation("orders"), 1);
    }

    #[tokio::test]
    async fn test_get_or_fetch_caches_success() {
        let cache = QueryCache::new();
        let calls = Cell::new(0);

        for _ in 0..2 {
            let v: Result<Vec<String>, String> = cache
                .get_or_fetch("properties", || async {
                    calls.set(calls.get() + 1);
                    Ok(vec!["Villa Azul".to_string()])
                })
                .await;
            assert_eq!(v.unwrap(), vec!["Villa Azul".to_string()]);
        }
        assert_eq!(calls.get(), 1);

        cache.invalidate("properties");
        let _: Result<Vec<String>, String> = cache
            .get_or_fetch("properties", || async {
                calls.set(calls.get() + 1);
                Ok(vec![])
            })
            .await;
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache = QueryCache::new();
        let r: Result<i32, String> = cache
            .get_or_fetch("stats", || async { Err("boom".to_string()) })
            .await;
        assert!(r.is_err());
        assert!(!cache.contains("stats"));
    }

    #[tokio::test]
    async fn test_invalidation_during_fetch_discards_result() {
        let cache = QueryCache::new();
        let c2 = cache.clone();
        let r: Result<i32, String> = cache
            .get_or_fetch("upsells", || async move {
                c2.invalidate("upsells");
                Ok(5)
            })
            .await;
        assert_eq!(r, Ok(5));
        assert!(!cache.contains("upsells"));
    }

    #[tokio::test]
    async fn test_first_variant_fetch_invalidated_through_base_key() {
        let cache = QueryCache::new();
        let c2 = cache.clone();
        let r: Result<i32, String> = cache
            .get_or_fetch("orders?status=pending", || async move {
                c2.invalidate("orders");
                Ok(5)
            })
            .await;
        assert_eq!(r, Ok(5));
        assert!(!cache.contains("orders?status=pending"));
        assert_eq!(cache.generation("orders?status=pending"), 1);
    }
}
