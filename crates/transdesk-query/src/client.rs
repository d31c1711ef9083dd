//! The query client: a keyed read cache with request coalescing.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use transdesk_common_async::{run_cancellable, CancellationToken};
use transdesk_common_core::{Error, Result};

use crate::key::QueryKey;
use crate::state::{CacheStats, QueryState};

type SharedFetch = Shared<BoxFuture<'static, Result<Value>>>;

#[derive(Default)]
struct Entry {
    data: Option<Value>,
    error: Option<Error>,
    stale: bool,
    updated_at: Option<Instant>,
    in_flight: Option<SharedFetch>,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<QueryKey, Entry>,
    stats: CacheStats,
}

/// Session-wide read cache.
///
/// Cloning is cheap and every clone shares the same entries. Values are
/// stored as JSON so one client can hold every resource type.
#[derive(Clone)]
pub struct QueryClient {
    inner: Arc<Mutex<Inner>>,
    enabled: bool,
}

impl fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryClient")
            .field("enabled", &self.enabled)
            .field("size", &self.inner.lock().entries.len())
            .finish()
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryClient {
    pub fn new() -> Self {
        Self::with_enabled(true)
    }

    /// A disabled cache never serves stored data: every read goes to the
    /// backend. Concurrent reads are still coalesced and states recorded.
    pub fn with_enabled(enabled: bool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Return fresh cached data for `key`, or run `fetch` and cache its result.
    ///
    /// While a fetch for `key` is in flight, further callers await that same
    /// request instead of issuing their own. A failed fetch records the error
    /// and keeps whatever data was cached before.
    pub async fn fetch_query<T, F, Fut>(&self, key: &QueryKey, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let shared = {
            let mut inner = self.inner.lock();
            let Inner { entries, stats } = &mut *inner;
            let entry = entries.entry(key.clone()).or_default();

            if self.enabled && !entry.stale {
                if let Some(data) = &entry.data {
                    stats.hits += 1;
                    debug!(key = %key, "query cache hit");
                    return decode(data.clone());
                }
            }

            if let Some(in_flight) = &entry.in_flight {
                stats.coalesced += 1;
                debug!(key = %key, "joining in-flight query");
                in_flight.clone()
            } else {
                stats.misses += 1;
                debug!(key = %key, "query cache miss");
                let request = fetch();
                let shared = async move {
                    let value = request.await?;
                    serde_json::to_value(value).map_err(|e| Error::decode(e.to_string()))
                }
                .boxed()
                .shared();
                entry.in_flight = Some(shared.clone());
                shared
            }
        };

        let result = shared.clone().await;
        self.settle(key, &shared, &result);
        result.and_then(decode)
    }

    /// Alias of [`fetch_query`](Self::fetch_query) used by route loaders.
    pub async fn ensure_query_data<T, F, Fut>(&self, key: &QueryKey, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        self.fetch_query(key, fetch).await
    }

    /// Store the outcome of `fetch` unless it was detached by an invalidation.
    fn settle(&self, key: &QueryKey, fetch: &SharedFetch, result: &Result<Value>) {
        let mut inner = self.inner.lock();
        let Some(entry) = inner.entries.get_mut(key) else {
            return;
        };
        let ours = entry
            .in_flight
            .as_ref()
            .is_some_and(|current| current.ptr_eq(fetch));
        if !ours {
            debug!(key = %key, "query result already settled or detached");
            return;
        }
        entry.in_flight = None;

        match result {
            Ok(value) => {
                entry.data = Some(value.clone());
                entry.error = None;
                entry.stale = false;
                entry.updated_at = Some(Instant::now());
            }
            Err(err) => {
                debug!(key = %key, error = %err, "query failed");
                entry.error = Some(err.clone());
            }
        }
    }

    /// Mark every entry under `prefix` stale and detach in-flight fetches.
    ///
    /// Returns the number of entries touched.
    pub fn invalidate_queries(&self, prefix: &QueryKey) -> usize {
        let mut inner = self.inner.lock();
        let Inner { entries, stats } = &mut *inner;

        let mut touched = 0;
        for (_, entry) in entries.iter_mut().filter(|(key, _)| key.starts_with(prefix)) {
            entry.stale = true;
            entry.in_flight = None;
            touched += 1;
        }
        stats.invalidations += touched as u64;
        debug!(prefix = %prefix, touched, "invalidated queries");
        touched
    }

    /// Drop every entry under `prefix`.
    pub fn remove_queries(&self, prefix: &QueryKey) -> usize {
        let mut inner = self.inner.lock();
        let before = inner.entries.len();
        inner.entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - inner.entries.len();
        debug!(prefix = %prefix, removed, "removed queries");
        removed
    }

    /// Cached data for `key`, fresh or stale.
    pub fn get_query_data<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let inner = self.inner.lock();
        let data = inner.entries.get(key)?.data.clone()?;
        decode(data).ok()
    }

    /// What a view bound to `key` should render.
    pub fn get_query_state<T: DeserializeOwned>(&self, key: &QueryKey) -> QueryState<T> {
        let inner = self.inner.lock();
        let Some(entry) = inner.entries.get(key) else {
            return QueryState::Pending;
        };
        if let Some(err) = &entry.error {
            return QueryState::Error(err.clone());
        }
        match &entry.data {
            Some(data) => match decode(data.clone()) {
                Ok(value) => QueryState::Success(value),
                Err(err) => QueryState::Error(err),
            },
            None => QueryState::Pending,
        }
    }

    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.inner
            .lock()
            .entries
            .get(key)
            .map_or(true, |entry| entry.stale || entry.data.is_none())
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.inner
            .lock()
            .entries
            .get(key)
            .is_some_and(|entry| entry.in_flight.is_some())
    }

    /// When the data under `key` was last stored.
    pub fn updated_at(&self, key: &QueryKey) -> Option<Instant> {
        self.inner.lock().entries.get(key)?.updated_at
    }

    /// Run a mutation and invalidate `invalidates` afterwards.
    ///
    /// A failed mutation leaves the cache untouched. A cancelled one may or
    /// may not have reached the backend, so it invalidates as well.
    pub async fn mutate<T, Fut>(
        &self,
        token: &CancellationToken,
        invalidates: &[QueryKey],
        mutation: Fut,
    ) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        let result = run_cancellable(token, mutation).await;
        match &result {
            Ok(_) | Err(Error::Cancelled) => {
                for prefix in invalidates {
                    self.invalidate_queries(prefix);
                }
            }
            Err(err) => debug!(error = %err, "mutation failed; cache untouched"),
        }
        result
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        CacheStats {
            size: inner.entries.len() as u64,
            ..inner.stats
        }
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::oneshot;

    fn counted(calls: &Arc<AtomicUsize>, value: u32) -> impl Future<Output = Result<u32>> {
        calls.fetch_add(1, Ordering::SeqCst);
        async move { Ok(value) }
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let client = QueryClient::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let key = QueryKey::new("numbers");

        let first: u32 = client.fetch_query(&key, || counted(&calls, 1)).await.unwrap();
        let second: u32 = client.fetch_query(&key, || counted(&calls, 2)).await.unwrap();

        assert_eq!((first, second), (1, 1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let stats = client.stats();
        assert_eq!((stats.hits, stats.misses, stats.size), (1, 1, 1));
    }

    #[tokio::test]
    async fn test_invalidation_forces_refetch() {
        let client = QueryClient::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let key = QueryKey::locales("p1");

        let _: u32 = client.fetch_query(&key, || counted(&calls, 1)).await.unwrap();
        assert_eq!(client.invalidate_queries(&QueryKey::new("locales")), 1);
        assert!(client.is_stale(&key));
        // Stale data stays readable until the refetch lands.
        assert_eq!(client.get_query_data::<u32>(&key), Some(1));

        let value: u32 = client.fetch_query(&key, || counted(&calls, 2)).await.unwrap();
        assert_eq!(value, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(!client.is_stale(&key));
    }

    #[tokio::test]
    async fn test_invalidation_leaves_other_prefixes() {
        let client = QueryClient::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let _: u32 = client
            .fetch_query(&QueryKey::locales("p1"), || counted(&calls, 1))
            .await
            .unwrap();
        let _: u32 = client
            .fetch_query(&QueryKey::locales("p2"), || counted(&calls, 1))
            .await
            .unwrap();

        assert_eq!(client.invalidate_queries(&QueryKey::locales("p1")), 1);
        assert!(!client.is_stale(&QueryKey::locales("p2")));
    }

    #[tokio::test]
    async fn test_concurrent_reads_share_one_request() {
        let client = QueryClient::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let key = QueryKey::projects();
        let (tx, rx) = oneshot::channel::<u32>();

        let leader = {
            let client = client.clone();
            let key = key.clone();
            let calls = Arc::clone(&calls);
            tokio::spawn(async move {
                client
                    .fetch_query(&key, move || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        async move { rx.await.map_err(|_| Error::Cancelled) }
                    })
                    .await
            })
        };
        while !client.is_fetching(&key) {
            tokio::task::yield_now().await;
        }

        let follower = {
            let client = client.clone();
            let key = key.clone();
            let calls = Arc::clone(&calls);
            tokio::spawn(async move { client.fetch_query(&key, || counted(&calls, 99)).await })
        };
        while client.stats().coalesced == 0 {
            tokio::task::yield_now().await;
        }

        tx.send(7).unwrap();
        assert_eq!(leader.await.unwrap(), Ok(7));
        assert_eq!(follower.await.unwrap(), Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidated_in_flight_fetch_is_not_cached() {
        let client = QueryClient::new();
        let key = QueryKey::projects();
        let (tx, rx) = oneshot::channel::<u32>();

        let pending = {
            let client = client.clone();
            let key = key.clone();
            tokio::spawn(async move {
                client
                    .fetch_query(&key, move || async move { rx.await.map_err(|_| Error::Cancelled) })
                    .await
            })
        };
        while !client.is_fetching(&key) {
            tokio::task::yield_now().await;
        }

        client.invalidate_queries(&QueryKey::projects());
        assert!(!client.is_fetching(&key));
        tx.send(1).unwrap();

        // The waiter still gets its answer.
        assert_eq!(pending.await.unwrap(), Ok(1));
        assert!(client.get_query_data::<u32>(&key).is_none());

        let calls = Arc::new(AtomicUsize::new(0));
        let fresh: u32 = client.fetch_query(&key, || counted(&calls, 2)).await.unwrap();
        assert_eq!(fresh, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_read_keeps_previous_data() {
        let client = QueryClient::new();
        let key = QueryKey::projects();
        let calls = Arc::new(AtomicUsize::new(0));

        let _: u32 = client.fetch_query(&key, || counted(&calls, 5)).await.unwrap();
        client.invalidate_queries(&key);

        let err = client
            .fetch_query::<u32, _, _>(&key, || async { Err(Error::transport("offline")) })
            .await
            .unwrap_err();
        assert!(err.is_transport());

        assert_eq!(client.get_query_data::<u32>(&key), Some(5));
        assert!(matches!(client.get_query_state::<u32>(&key), QueryState::Error(e) if e.is_transport()));
    }

    #[tokio::test]
    async fn test_query_state_transitions() {
        let client = QueryClient::new();
        let key = QueryKey::projects();
        assert_eq!(client.get_query_state::<u32>(&key), QueryState::Pending);

        let _: u32 = client.fetch_query(&key, || async { Ok(3) }).await.unwrap();
        assert_eq!(client.get_query_state::<u32>(&key), QueryState::Success(3));
        assert!(client.updated_at(&key).is_some());
    }

    #[tokio::test]
    async fn test_disabled_cache_always_fetches() {
        let client = QueryClient::with_enabled(false);
        let calls = Arc::new(AtomicUsize::new(0));
        let key = QueryKey::projects();

        let _: u32 = client.fetch_query(&key, || counted(&calls, 1)).await.unwrap();
        let _: u32 = client.fetch_query(&key, || counted(&calls, 2)).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(client.get_query_data::<u32>(&key), Some(2));
    }

    #[tokio::test]
    async fn test_mutation_invalidates_only_on_success() {
        let client = QueryClient::new();
        let token = CancellationToken::new();
        let key = QueryKey::projects();
        let _: u32 = client.fetch_query(&key, || async { Ok(1) }).await.unwrap();

        let err = client
            .mutate::<(), _>(&token, &[key.clone()], async { Err(Error::server(500, "")) })
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(!client.is_stale(&key));

        client
            .mutate(&token, &[key.clone()], async { Ok(()) })
            .await
            .unwrap();
        assert!(client.is_stale(&key));
    }

    #[tokio::test]
    async fn test_cancelled_mutation_invalidates() {
        let client = QueryClient::new();
        let key = QueryKey::projects();
        let _: u32 = client.fetch_query(&key, || async { Ok(1) }).await.unwrap();

        let token = CancellationToken::new();
        token.cancel();
        let err = client
            .mutate(&token, &[key.clone()], async { Ok(()) })
            .await
            .unwrap_err();
        assert_eq!(err, Error::Cancelled);
        assert!(client.is_stale(&key));
    }

    #[tokio::test]
    async fn test_remove_queries_by_prefix() {
        let client = QueryClient::new();
        let _: u32 = client.fetch_query(&QueryKey::project("1"), || async { Ok(1) }).await.unwrap();
        let _: u32 = client.fetch_query(&QueryKey::locales("1"), || async { Ok(1) }).await.unwrap();

        assert_eq!(client.remove_queries(&QueryKey::projects()), 1);
        assert_eq!(client.stats().size, 1);
        assert_eq!(client.remove_queries(&QueryKey::projects()), 0);
        assert_eq!(client.get_query_data::<u32>(&QueryKey::locales("1")), Some(1));
    }
}
