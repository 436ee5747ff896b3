use std::{collections::HashMap, future::Future, time::Duration};
use tokio::{sync::Mutex, time::Instant};
use tracing::debug;

/// Entries older than this are swept whenever the map reaches this size.
const SWEEP_THRESHOLD: usize = 1024;

struct CacheEntry {
    suggestions: Vec<String>,
    stored_at: Instant,
}

/// In-process autocomplete cache keyed by normalized query text.
///
/// Expiry is checked on read; there is no background eviction.
pub struct SuggestionCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl SuggestionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub async fn get(&self, key: &str) -> Option<Vec<String>> {
        let mut entries = self.entries.lock().await;
        let fresh = entries.get(key)?.stored_at.elapsed() < self.ttl;
        if fresh {
            return entries.get(key).map(|entry| entry.suggestions.clone());
        }
        debug!("Cache STALE for key={}", key);
        entries.remove(key);
        None
    }

    pub async fn insert(&self, key: String, suggestions: Vec<String>) {
        let mut entries = self.entries.lock().await;
        if entries.len() >= SWEEP_THRESHOLD {
            let ttl = self.ttl;
            entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        }
        entries.insert(
            key,
            CacheEntry {
                suggestions,
                stored_at: Instant::now(),
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Fetch-through lookup. Only successful fetches are stored; the lock is not
    /// held while `fetch_fn` runs.
    pub async fn get_or_fetch<E, F, Fut>(&self, key: &str, fetch_fn: F) -> Result<Vec<String>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<String>, E>>,
    {
        if let Some(cached) = self.get(key).await {
            debug!("Cache HIT for key={}", key);
            return Ok(cached);
        }
        debug!("Cache MISS for key={}", key);

        let suggestions = fetch_fn().await?;
        self.insert(key.to_string(), suggestions.clone()).await;
        Ok(suggestions)
    }
}
