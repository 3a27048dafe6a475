use std::sync::Arc;

use anyhow::Context;
use intake_api_rest::RestServerConfig;
use intake_config::Config;
use intake_core_health_impl::HealthServiceConfig;
use intake_core_notification_impl::NotificationServiceConfig;
use intake_di::provider;
use intake_shared_impl::rate_limit::RateLimitServiceConfig;
use types::{Cache, Email};

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        cache: Cache,
        email: Email,
        ..config: ConfigProvider {
            // API
            RestServerConfig,

            // Shared
            RateLimitServiceConfig,

            // Core
            HealthServiceConfig,
            NotificationServiceConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider, cache: Cache, email: Email) -> Self {
        Self {
            _cache: Default::default(),
            cache,
            email,
            config,
        }
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        // API
        rest_server_config: RestServerConfig,

        // Shared
        rate_limit_service_config: RateLimitServiceConfig,

        // Core
        health_service_config: HealthServiceConfig,
        notification_service_config: NotificationServiceConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // API
        let allowed_origin = config
            .environment
            .is_production()
            .then(|| config.http.allowed_origin.parse())
            .transpose()
            .context("Invalid allowed origin")?;
        let rest_server_config = RestServerConfig {
            allowed_origin,
            trust_forwarded_headers: config.http.trust_forwarded_headers,
        };

        // Shared
        let rate_limit_service_config = RateLimitServiceConfig {
            window: config.rate_limit.window.into(),
            max_requests: config.rate_limit.max_requests,
        };

        // Core
        let health_service_config = HealthServiceConfig {
            cache_ttl: config.health.cache_ttl.into(),
        };

        let notification_service_config = NotificationServiceConfig {
            alert_recipient: Arc::new(config.notification.alert_recipient.clone().into()),
            send_timeout: config.notification.send_timeout.into(),
        };

        Ok(Self {
            _cache: Default::default(),
            rest_server_config,
            rate_limit_service_config,
            health_service_config,
            notification_service_config,
        })
    }
}
