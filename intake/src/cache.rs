use std::{fmt::Debug, time::Duration};

use intake_cache_contracts::CacheService;
use intake_cache_memory::MemoryCache;
use intake_cache_valkey::{ValkeyCache, ValkeyCacheConfig};
use intake_config::CacheConfig;
use serde::{de::DeserializeOwned, Serialize};

/// The cache backend selected in the config.
#[derive(Debug, Clone)]
pub enum Cache {
    Memory(MemoryCache),
    Valkey(ValkeyCache),
}

/// Connect to the configured cache backend
pub async fn connect(config: &CacheConfig) -> anyhow::Result<Cache> {
    match config {
        CacheConfig::Memory => Ok(Cache::Memory(MemoryCache::new())),
        CacheConfig::Valkey(config) => ValkeyCache::connect(&ValkeyCacheConfig {
            url: config.url.clone(),
            key_prefix: config.key_prefix.clone(),
            max_connections: config.max_connections,
            min_connections: config.min_connections,
            acquire_timeout: config.acquire_timeout.into(),
            idle_timeout: config.idle_timeout.map(Into::into),
            max_lifetime: config.max_lifetime.map(Into::into),
        })
        .await
        .map(Cache::Valkey),
    }
}

impl CacheService for Cache {
    async fn get<T: DeserializeOwned + Debug + 'static>(
        &self,
        key: &str,
    ) -> anyhow::Result<Option<T>> {
        match self {
            Self::Memory(cache) => cache.get(key).await,
            Self::Valkey(cache) => cache.get(key).await,
        }
    }

    async fn set<T: Serialize + Debug + Sync + 'static>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> anyhow::Result<()> {
        match self {
            Self::Memory(cache) => cache.set(key, value, ttl).await,
            Self::Valkey(cache) => cache.set(key, value, ttl).await,
        }
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        match self {
            Self::Memory(cache) => cache.remove(key).await,
            Self::Valkey(cache) => cache.remove(key).await,
        }
    }

    async fn ping(&self) -> anyhow::Result<()> {
        match self {
            Self::Memory(cache) => cache.ping().await,
            Self::Valkey(cache) => cache.ping().await,
        }
    }
}
