use std::{fmt::Debug, future::Future, time::Duration};

use serde::{de::DeserializeOwned, Serialize};

/// A key value store with per item expiry.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait CacheService: Send + Sync + 'static {
    /// Reads a cache item.
    ///
    /// Returns [`None`] if the item does not exist or has expired.
    fn get<T: DeserializeOwned + Debug + 'static>(
        &self,
        key: &str,
    ) -> impl Future<Output = anyhow::Result<Option<T>>> + Send;

    /// Creates a new or updates an existing cache item.
    ///
    /// If `ttl` is set, the item is automatically removed after this timeout.
    fn set<T: Serialize + Debug + Sync + 'static>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Removes an existing cache item.
    ///
    /// Does nothing if the cache item does not exist.
    fn remove(&self, key: &str) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Verify the connection to the cache.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockCacheService {
    pub fn with_get<T: DeserializeOwned + Debug + Send + 'static>(
        mut self,
        key: String,
        result: Option<T>,
    ) -> Self {
        self.expect_get()
            .once()
            .with(mockall::predicate::eq(key))
            .return_once(|_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_get_error<T: DeserializeOwned + Debug + Send + 'static>(
        mut self,
        key: String,
    ) -> Self {
        self.expect_get::<T>()
            .once()
            .with(mockall::predicate::eq(key))
            .return_once(|_| {
                Box::pin(std::future::ready(Err(anyhow::anyhow!(
                    "cache is unavailable"
                ))))
            });
        self
    }

    pub fn with_set<T: Debug + PartialEq + Serialize + Send + Sync + 'static>(
        mut self,
        key: String,
        value: T,
        ttl: Option<Duration>,
    ) -> Self {
        self.expect_set()
            .once()
            .with(
                mockall::predicate::eq(key),
                mockall::predicate::eq(value),
                mockall::predicate::eq(ttl),
            )
            .return_once(|_, _, _| Box::pin(std::future::ready(Ok(()))));
        self
    }

    pub fn with_remove(mut self, key: String) -> Self {
        self.expect_remove()
            .once()
            .with(mockall::predicate::eq(key))
            .return_once(|_| Box::pin(std::future::ready(Ok(()))));
        self
    }

    pub fn with_ping(mut self, healthy: bool) -> Self {
        self.expect_ping().once().return_once(move || {
            Box::pin(std::future::ready(if healthy {
                Ok(())
            } else {
                Err(anyhow::anyhow!("cache is unavailable"))
            }))
        });
        self
    }
}
