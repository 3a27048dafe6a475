use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use intake_cache_contracts::CacheService;
use intake_core_health_contracts::{HealthService, HealthStatus};
use intake_di::Build;
use intake_email_contracts::EmailService;
use intake_shared_contracts::time::TimeService;
use tokio::sync::RwLock;
use tracing::error;

#[derive(Debug, Clone, Build)]
pub struct HealthServiceImpl<Time, Cache, Email> {
    time: Time,
    cache: Cache,
    email: Email,
    config: HealthServiceConfig,
    #[state]
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthServiceConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: DateTime<Utc>,
}

impl CachedStatus {
    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now < self.timestamp + ttl
    }
}

impl<Time, Cache, Email> HealthService for HealthServiceImpl<Time, Cache, Email>
where
    Time: TimeService,
    Cache: CacheService,
    Email: EmailService,
{
    async fn get_status(&self) -> HealthStatus {
        let now = self.time.now();
        let ttl = self.config.cache_ttl;

        let cache_guard = self.state.cache.read().await;
        if let Some(cached) = cache_guard.as_ref().filter(|c| c.is_fresh(now, ttl)) {
            return cached.status;
        }
        drop(cache_guard);

        let mut cache_guard = self.state.cache.write().await;
        if let Some(cached) = cache_guard.as_ref().filter(|c| c.is_fresh(now, ttl)) {
            return cached.status;
        }

        let (cache, email) = tokio::join!(self.cache.ping(), self.email.ping());

        let status = HealthStatus {
            cache: cache
                .inspect_err(|err| error!("Failed to ping cache: {err}"))
                .is_ok(),
            email: email
                .inspect_err(|err| error!("Failed to ping smtp server: {err}"))
                .is_ok(),
        };

        cache_guard
            .insert(CachedStatus {
                status,
                timestamp: now,
            })
            .status
    }
}
