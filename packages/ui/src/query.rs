//! # Reactive access to the query cache
//!
//! [`QueryClient`] pairs the shared [`QueryCache`] with a revision signal.
//! [`use_cached`] reads the revision inside its resource, so any
//! [`QueryClient::invalidate`] re-runs every cached resource: keys that were
//! dropped refetch, keys that survived are served straight from the cache.
//!
//! ```ignore
//! let properties = use_cached(
//!     || Property::collection_key(),
//!     move || async move { session.peek().client().list::<Property>().await },
//! );
//! ```
//!
//! Failed fetches are reported through the [`Notifier`] and never cached, so the
//! next invalidation (or remount) retries.

use std::future::Future;

use api::ApiError;
use dioxus::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use store::QueryCache;

use crate::notify::use_notifier;

#[derive(Clone, Copy, PartialEq)]
pub struct QueryClient {
    cache: Signal<QueryCache>,
    revision: Signal<u64>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self {
            cache: Signal::new(QueryCache::new()),
            revision: Signal::new(0),
        }
    }

    /// The shared cache. Does not subscribe the caller.
    pub fn cache(&self) -> QueryCache {
        self.cache.peek().clone()
    }

    pub fn invalidate(&self, key: &str) {
        self.cache().invalidate(key);
        self.bump();
    }

    /// Run several invalidations, then refresh once.
    pub fn invalidate_with(&self, f: impl FnOnce(&QueryCache)) {
        f(&self.cache());
        self.bump();
    }

    pub fn clear(&self) {
        self.cache().clear();
        self.bump();
    }

    fn bump(&self) {
        let mut revision = self.revision;
        *revision.write() += 1;
    }

    /// Current revision; reading it subscribes the caller.
    fn revision(&self) -> u64 {
        (self.revision)()
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_query_client() -> QueryClient {
    use_context::<QueryClient>()
}

/// A resource backed by the query cache under `key`.
///
/// `key` may read signals (filters, route ids); a change refetches under the
/// new key.
pub fn use_cached<T, K, F, Fut>(mut key: K, mut fetch: F) -> Resource<Result<T, ApiError>>
where
    T: Serialize + DeserializeOwned + 'static,
    K: FnMut() -> String + 'static,
    F: FnMut() -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let client = use_query_client();
    let notifier = use_notifier();

    use_resource(move || {
        let key = key();
        let _revision = client.revision();
        let cache = client.cache();
        let request = fetch();
        async move {
            let result = cache.get_or_fetch(&key, || request).await;
            if let Err(e) = &result {
                notifier.error(e);
            }
            result
        }
    })
}
