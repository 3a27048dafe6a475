use std::{fmt::Debug, time::Duration};

use anyhow::Context;
use bb8_redis::{
    bb8::{Pool, PooledConnection},
    redis::{self, AsyncCommands},
    RedisConnectionManager,
};
use intake_cache_contracts::CacheService;
use intake_utils::trace_instrument;
use serde::{de::DeserializeOwned, Serialize};

/// A cache backed by a Valkey (or Redis) server, shared by all instances of
/// the service.
#[derive(Debug, Clone)]
pub struct ValkeyCache {
    pool: Pool<RedisConnectionManager>,
    key_prefix: String,
}

#[derive(Debug)]
pub struct ValkeyCacheConfig {
    pub url: String,
    /// Prepended to every key, so several deployments can share one server.
    pub key_prefix: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

impl ValkeyCache {
    pub async fn connect(config: &ValkeyCacheConfig) -> anyhow::Result<Self> {
        let manager = RedisConnectionManager::new(config.url.as_str())
            .context("Failed to parse cache url")?;
        let pool = Pool::builder()
            .max_size(config.max_connections)
            .min_idle(config.min_connections)
            .connection_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .build(manager)
            .await
            .context("Failed to connect to cache")?;

        Ok(Self {
            pool,
            key_prefix: config.key_prefix.clone(),
        })
    }

    fn key(&self, key: &str) -> String {
        format!("{}{key}", self.key_prefix)
    }

    async fn connection(&self) -> anyhow::Result<PooledConnection<'_, RedisConnectionManager>> {
        self.pool
            .get()
            .await
            .context("Failed to acquire cache connection")
    }
}

impl CacheService for ValkeyCache {
    #[trace_instrument(skip(self))]
    async fn get<T: DeserializeOwned + Debug + 'static>(
        &self,
        key: &str,
    ) -> anyhow::Result<Option<T>> {
        let mut conn = self.connection().await?;

        let result = conn
            .get::<_, Option<Vec<u8>>>(self.key(key))
            .await
            .context("Failed to read value from cache")?;

        result
            .map(|data| rmp_serde::from_slice(&data))
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
        let value = rmp_serde::to_vec(value).context("Failed to serialize value")?;

        let key = self.key(key);
        let mut conn = self.connection().await?;

        if let Some(ttl) = ttl {
            conn.pset_ex(key, value, ttl.as_millis().try_into()?).await
        } else {
            conn.set(key, value).await
        }
        .context("Failed to write value to cache")
    }

    #[trace_instrument(skip(self))]
    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        let mut conn = self.connection().await?;

        conn.del(self.key(key))
            .await
            .context("Failed to remove item from cache")
    }

    #[trace_instrument(skip(self))]
    async fn ping(&self) -> anyhow::Result<()> {
        let mut conn = self.connection().await?;

        redis::cmd("PING")
            .exec_async(&mut *conn)
            .await
            .context("Failed to ping cache")
    }
}
