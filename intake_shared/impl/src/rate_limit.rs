use std::{sync::Arc, time::Duration};

use anyhow::Context;
use chrono::TimeDelta;
use intake_cache_contracts::CacheService;
use intake_di::Build;
use intake_models::{client::ClientIdentifier, rate_limit::RateLimitRecord};
use intake_shared_contracts::{
    rate_limit::{RateLimitDecision, RateLimitService},
    time::TimeService,
};
use intake_utils::trace_instrument;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone, Build)]
pub struct RateLimitServiceImpl<Time, Cache> {
    time: Time,
    cache: Cache,
    config: RateLimitServiceConfig,
    /// Held from reading a record until the updated record is written, so
    /// concurrent requests of this process cannot pass on the same count.
    #[state]
    lock: Arc<Mutex<()>>,
}

#[derive(Debug, Clone)]
pub struct RateLimitServiceConfig {
    pub window: Duration,
    pub max_requests: u32,
}

fn record_key(client: &ClientIdentifier) -> String {
    format!("rate_limit:{client}")
}

impl<Time, Cache> RateLimitService for RateLimitServiceImpl<Time, Cache>
where
    Time: TimeService,
    Cache: CacheService,
{
    #[trace_instrument(skip(self))]
    async fn check(&self, client: &ClientIdentifier) -> anyhow::Result<RateLimitDecision> {
        let key = record_key(client);
        let window = TimeDelta::from_std(self.config.window)
            .context("Rate limit window is out of range")?;

        let _guard = self.lock.lock().await;
        let now = self.time.now();

        let record = self
            .cache
            .get::<RateLimitRecord>(&key)
            .await
            .context("Failed to read rate limit record")?
            .filter(|record| !record.is_expired(now, window));

        let record = match record {
            None => RateLimitRecord::new(now),
            Some(record) if record.count >= self.config.max_requests => {
                let retry_after = (record.window_end(window) - now)
                    .to_std()
                    .unwrap_or_default();
                debug!(%client, ?retry_after, "rate limit exceeded");
                return Ok(RateLimitDecision::Limited { retry_after });
            }
            Some(record) => RateLimitRecord {
                count: record.count + 1,
                ..record
            },
        };

        self.cache
            .set(&key, &record, Some(self.config.window))
            .await
            .context("Failed to write rate limit record")?;

        Ok(RateLimitDecision::Allowed {
            remaining: self.config.max_requests.saturating_sub(record.count),
        })
    }
}
