//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::*;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub redis: RedisSettings,
    pub sessions: SessionSettings,
    pub catalog: CatalogSettings,
    pub share: ShareSettings,
    pub export: ExportSettings,
    pub cors: CorsSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RedisSettings {
    pub url: String,
    pub max_connections: usize,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionStoreKind {
    Redis,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub store: SessionStoreKind,
    pub ttl_seconds: u64,
    /// Namespace for session keys; may be empty to use raw session ids.
    pub key_prefix: String,
    /// 0 disables the background sweeper.
    pub sweep_interval_seconds: u64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    Postgres,
    File,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogSettings {
    pub source: CatalogSource,
    /// JSON seed used when `source = "file"`.
    pub seed_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShareSettings {
    pub frontend_url: String,
    pub embed_width: u32,
    pub embed_height: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportSettings {
    pub icon_timeout_ms: u64,
    pub max_icon_bytes: usize,
    pub inline_icons: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
    pub directory: Option<String>,
    pub file_prefix: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;
        config.try_deserialize()
    }

    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "curator-server")?
            .set_default("app.request_timeout_seconds", 30)?
            .set_default("database.url", "postgres://localhost/travel_curator")?
            .set_default("database.max_connections", 10)?
            .set_default("database.acquire_timeout_seconds", 3)?
            .set_default("redis.url", "redis://127.0.0.1:6379/1")?
            .set_default("redis.max_connections", 16)?
            .set_default("sessions.store", "redis")?
            .set_default("sessions.ttl_seconds", DEFAULT_SESSION_TTL_SECONDS)?
            .set_default("sessions.key_prefix", DEFAULT_SESSION_KEY_PREFIX)?
            .set_default("sessions.sweep_interval_seconds", DEFAULT_SWEEP_INTERVAL_SECONDS)?
            .set_default("catalog.source", "postgres")?
            .set_default("catalog.seed_path", "config/catalog.seed.json")?
            .set_default("share.frontend_url", "http://localhost:5173")?
            .set_default("share.embed_width", DEFAULT_EMBED_WIDTH)?
            .set_default("share.embed_height", DEFAULT_EMBED_HEIGHT)?
            .set_default("export.icon_timeout_ms", DEFAULT_ICON_TIMEOUT_MS)?
            .set_default("export.max_icon_bytes", DEFAULT_MAX_ICON_BYTES as u64)?
            .set_default("export.inline_icons", true)?
            .set_default("cors.allowed_origins", vec!["http://localhost:5173"])?
            .set_default("log.level", "info")?
            .set_default("log.file_prefix", "curator-server.log")
    }
}
