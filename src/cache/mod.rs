//! Memoizing wrapper around any [`Deliverable`].
//!
//! Entries are keyed by the requested address (or a bare domain) and are
//! dropped after `expire_threshold` uses, so a stale verdict is served at
//! most that many times before the wrapped checker is asked again.

mod options;

pub use options::{CacheOptions, DEFAULT_EXPIRE_THRESHOLD};

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use crate::address::user_and_domain;
use crate::deliver::{Deliverable, Delivery};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheEntry {
    deliverable: bool,
    hit_count: u32,
}

pub struct CachedDeliver<D> {
    inner: D,
    options: CacheOptions,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl<D: Deliverable> CachedDeliver<D> {
    pub fn new(inner: D) -> Self {
        Self::with_options(inner, CacheOptions::default())
    }

    pub fn with_options(inner: D, options: CacheOptions) -> Self {
        Self {
            inner,
            options,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    pub fn options(&self) -> &CacheOptions {
        &self.options
    }

    /// Existence check only: does not count as a use.
    pub fn is_hit(&self, key: &str) -> bool {
        self.entries().contains_key(key)
    }

    pub fn clear(&self, key: &str) {
        self.entries().remove(key);
    }

    pub fn clear_all(&self) {
        self.entries().clear();
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        // une entrée n'est jamais laissée à moitié écrite
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Serves `key` from the cache, falling back to its bare domain.
    /// The entry that answered is counted and expired in the same critical section.
    fn lookup(&self, key: &str) -> Option<bool> {
        let mut entries = self.entries();
        let found = if entries.contains_key(key) {
            key
        } else {
            let (_, domain) = user_and_domain(key);
            if domain.is_empty() || !entries.contains_key(domain) {
                return None;
            }
            domain
        };

        let entry = entries.get_mut(found)?;
        entry.hit_count = entry.hit_count.saturating_add(1);
        let deliverable = entry.deliverable;
        if self.options.is_expired(entry.hit_count) {
            entries.remove(found);
            debug!(key, entry = found, "cache entry expired");
        }
        Some(deliverable)
    }

    fn store(&self, key: &str, deliverable: bool) {
        let entry = CacheEntry {
            deliverable,
            hit_count: 1,
        };
        let mut entries = self.entries();
        if self.options.is_expired(entry.hit_count) {
            entries.remove(key);
        } else {
            entries.insert(key.to_string(), entry);
        }
    }
}

#[async_trait]
impl<D: Deliverable> Deliverable for CachedDeliver<D> {
    async fn deliver(&self, key: &str) -> Delivery {
        if let Some(deliverable) = self.lookup(key) {
            debug!(key, deliverable, "cache hit");
            return Delivery::new(deliverable, key);
        }

        debug!(key, "cache miss");
        let delivery = self.inner.deliver(key).await;
        // stocké sous la clé demandée, pas sous l'identifiant renvoyé
        self.store(key, delivery.deliverable);
        delivery
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct MockDeliver {
        deliverable: AtomicBool,
        calls: AtomicUsize,
    }

    impl MockDeliver {
        fn set(&self, deliverable: bool) {
            self.deliverable.store(deliverable, Ordering::SeqCst);
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Deliverable for MockDeliver {
        async fn deliver(&self, email: &str) -> Delivery {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Delivery::new(self.deliverable.load(Ordering::SeqCst), email)
        }
    }

    fn cache(threshold: Option<u32>) -> (Arc<MockDeliver>, CachedDeliver<Arc<MockDeliver>>) {
        let mock = Arc::new(MockDeliver::default());
        let cache = CachedDeliver::with_options(
            Arc::clone(&mock),
            CacheOptions {
                expire_threshold: threshold,
            },
        );
        (mock, cache)
    }

    #[tokio::test]
    async fn miss_then_hit_serves_cached_undeliverable() {
        let (mock, cache) = cache(Some(3));
        let key = "email";
        assert!(!cache.is_hit(key));

        assert!(!cache.deliver(key).await.deliverable);
        assert!(cache.is_hit(key));

        mock.set(true);
        let second = cache.deliver(key).await;
        assert!(!second.deliverable);
        assert_eq!(second.address, key);
        assert!(cache.is_hit(key));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn miss_then_hit_serves_cached_deliverable() {
        let (mock, cache) = cache(Some(3));
        mock.set(true);
        assert!(cache.deliver("email").await.deliverable);
        mock.set(false);
        assert!(cache.deliver("email").await.deliverable);
        assert!(cache.is_hit("email"));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn entry_expires_after_threshold() {
        let (mock, cache) = cache(Some(2));
        let key = "email";

        assert!(!cache.deliver(key).await.deliverable);
        assert!(cache.is_hit(key));

        mock.set(true);
        // servi depuis l'entrée qui expire
        assert!(!cache.deliver(key).await.deliverable);
        assert!(!cache.is_hit(key));
        assert_eq!(mock.calls(), 1);

        assert!(cache.deliver(key).await.deliverable);
        assert!(cache.is_hit(key));
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn default_threshold_is_three_uses() {
        let (mock, cache) = cache(Some(DEFAULT_EXPIRE_THRESHOLD));
        for _ in 0..3 {
            cache.deliver("email").await;
        }
        assert!(!cache.is_hit("email"));
        assert_eq!(mock.calls(), 1);
        cache.deliver("email").await;
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn threshold_of_one_never_retains() {
        let (mock, cache) = cache(Some(1));
        cache.deliver("email").await;
        assert!(!cache.is_hit("email"));
        cache.deliver("email").await;
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn no_threshold_never_expires() {
        let (mock, cache) = cache(None);
        for _ in 0..10 {
            cache.deliver("email").await;
        }
        assert!(cache.is_hit("email"));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn domain_entry_answers_for_addresses() {
        let (mock, cache) = cache(Some(3));
        mock.set(true);
        cache.deliver("b.com").await;
        mock.set(false);

        let delivery = cache.deliver("a@b.com").await;
        assert_eq!(delivery, Delivery::new(true, "a@b.com"));
        assert_eq!(mock.calls(), 1);
        assert!(!cache.is_hit("a@b.com"));

        // la deuxième lecture via l'adresse fait expirer l'entrée du domaine
        cache.deliver("x@b.com").await;
        assert!(!cache.is_hit("b.com"));
    }

    #[tokio::test]
    async fn entry_is_stored_under_requested_key() {
        struct Normalizing;

        #[async_trait]
        impl Deliverable for Normalizing {
            async fn deliver(&self, email: &str) -> Delivery {
                Delivery::new(true, email.to_ascii_lowercase())
            }
        }

        let cache = CachedDeliver::new(Normalizing);
        let delivery = cache.deliver("Alex@Gmail.com").await;
        assert_eq!(delivery.address, "alex@gmail.com");
        assert!(cache.is_hit("Alex@Gmail.com"));
        assert!(!cache.is_hit("alex@gmail.com"));
    }

    #[tokio::test]
    async fn clear_and_clear_all() {
        let (mock, cache) = cache(Some(3));
        cache.deliver("email").await;
        cache.deliver("other").await;
        assert_eq!(cache.len(), 2);

        cache.clear("email");
        assert!(!cache.is_hit("email"));
        assert!(cache.is_hit("other"));

        cache.deliver("email").await;
        assert!(cache.is_hit("email"));
        assert_eq!(mock.calls(), 3);

        cache.clear_all();
        assert!(!cache.is_hit("email"));
        assert!(!cache.is_hit("other"));
        assert!(cache.is_empty());
        assert_eq!(mock.calls(), 3);
    }

    #[tokio::test]
    async fn is_hit_does_not_count_as_use() {
        let (mock, cache) = cache(Some(2));
        cache.deliver("email").await;
        for _ in 0..5 {
            assert!(cache.is_hit("email"));
        }
        cache.deliver("email").await;
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_hits_count_each_use_once() {
        let (mock, cache) = cache(Some(5));
        let cache = Arc::new(cache);
        cache.deliver("email").await;

        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move { cache.deliver("email").await })
            })
            .collect();
        for task in tasks {
            task.await.expect("task");
        }
        // 1 création + 4 lectures = 5 => expirée, sans nouvel appel réseau
        assert!(!cache.is_hit("email"));
        assert_eq!(mock.calls(), 1);
    }
}
