use std::{collections::HashMap, fmt::Debug, sync::Arc, time::Duration};

use anyhow::Context;
use intake_cache_contracts::CacheService;
use intake_utils::trace_instrument;
use serde::{de::DeserializeOwned, Serialize};
use tokio::{sync::Mutex, time::Instant};

/// An in-process cache.
///
/// Items are stored serialized, just like in an external cache, so both
/// implementations accept and reject the same values. Expired items are
/// removed lazily.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    items: Arc<Mutex<HashMap<String, Item>>>,
}

#[derive(Debug)]
struct Item {
    data: Vec<u8>,
    expires_at: Option<Instant>,
}

impl Item {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of items that have not expired yet.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let items = self.items.lock().await;
        items.values().filter(|item| !item.is_expired(now)).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn clear(&self) {
        self.items.lock().await.clear();
    }
}

impl CacheService for MemoryCache {
    #[trace_instrument(skip(self))]
    async fn get<T: DeserializeOwned + Debug + 'static>(
        &self,
        key: &str,
    ) -> anyhow::Result<Option<T>> {
        let now = Instant::now();
        let mut items = self.items.lock().await;

        if items.get(key).is_some_and(|item| item.is_expired(now)) {
            items.remove(key);
        }

        items
            .get(key)
            .map(|item| rmp_serde::from_slice(&item.data))
            .transpose()
            .context("Failed to deserialize cached value")
    }

    #[trace_instrument(skip(self))]
    async fn set<T: Serialize + Debug + Sync + 'static>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> anyhow::Result<()> {
        let data = rmp_serde::to_vec(value).context("Failed to serialize value")?;
        let now = Instant::now();
        let expires_at = ttl.map(|ttl| now + ttl);

        let mut items = self.items.lock().await;
        items.retain(|_, item| !item.is_expired(now));
        items.insert(key.into(), Item { data, expires_at });

        Ok(())
    }

    #[trace_instrument(skip(self))]
    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.items.lock().await.remove(key);
        Ok(())
    }

    #[trace_instrument(skip(self))]
    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
