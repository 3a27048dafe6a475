use intake_cache_contracts::CacheService;
use intake_config::Config;
use intake_di::Provide;
use intake_email_contracts::EmailService;
use tracing::{info, warn};

use crate::{
    cache, email,
    environment::{types::RestServer, ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!(environment = ?config.environment, "Starting intake backend");

    info!("Connecting to cache");
    let cache = cache::connect(&config.cache).await?;
    cache.ping().await?;

    info!("Connecting to smtp server");
    let email = email::connect(&config)?;
    if let Err(err) = email.ping().await {
        warn!("Email delivery is unavailable: {err}");
    }

    let config_provider = ConfigProvider::new(&config)?;
    let mut provider = Provider::new(config_provider, cache, email);
    let server: RestServer = provider.provide();
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
