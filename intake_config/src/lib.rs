use std::{net::IpAddr, path::Path};

use anyhow::Context;
use config::{File, FileFormat};
use intake_models::email_address::{EmailAddress, EmailAddressWithName};
use serde::Deserialize;

pub use duration::Duration;

mod duration;

/// The default configuration, compiled into the binary.
pub const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

/// Environment variable containing a colon separated list of additional
/// config files. Later files override earlier ones.
pub const CONFIG_PATH_ENV: &str = "INTAKE_CONFIG";

/// Loads the default config and the files listed in [`CONFIG_PATH_ENV`].
pub fn load() -> anyhow::Result<Config> {
    let paths = std::env::var_os(CONFIG_PATH_ENV)
        .map(|paths| std::env::split_paths(&paths).collect::<Vec<_>>())
        .unwrap_or_default();
    load_paths(&paths)
}

/// Loads the default config and layers the given files on top of it.
pub fn load_paths<P: AsRef<Path>>(paths: &[P]) -> anyhow::Result<Config> {
    let builder =
        config::Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
    paths
        .iter()
        .try_fold(builder, |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub environment: Environment,
    pub http: HttpConfig,
    pub cache: CacheConfig,
    pub email: EmailConfig,
    pub notification: NotificationConfig,
    pub rate_limit: RateLimitConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    pub allowed_origin: String,
    pub trust_forwarded_headers: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum CacheConfig {
    Memory,
    Valkey(ValkeyConfig),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValkeyConfig {
    pub url: String,
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

fn default_key_prefix() -> String {
    "intake:".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    pub smtp_url: Option<String>,
    pub from: EmailAddressWithName,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    pub alert_recipient: EmailAddress,
    pub send_timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    pub window: Duration,
    pub max_requests: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}
