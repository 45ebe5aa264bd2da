//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `sensorsync.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use sensorsync_adapter_http_axum::router::DEFAULT_MAX_BODY_BYTES;
use sensorsync_app::services::ingest_service::DEFAULT_MAX_ATTEMPTS;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Document store settings.
    pub store: StoreConfig,
    /// Ingestion tuning.
    pub ingest: IngestConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
}

/// Document store configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
    /// Database provisioned at startup.
    pub database: String,
    /// Container provisioned at startup.
    pub container: String,
}

/// Ingestion configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Read-merge-write rounds per reading before a conflict is surfaced.
    pub max_attempts: u32,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `sensorsync.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("sensorsync.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SENSORSYNC_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("SENSORSYNC_PORT")
            && let Ok(port) = val.parse()
        {
            self.server.port = port;
        }
        if let Ok(val) = std::env::var("SENSORSYNC_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("SENSORSYNC_MAX_BODY_BYTES")
            && let Ok(max_body_bytes) = val.parse()
        {
            self.server.max_body_bytes = max_body_bytes;
        }
        if let Ok(val) = std::env::var("SENSORSYNC_STORE_URL") {
            self.store.url = val;
        }
        if let Ok(val) = std::env::var("SENSORSYNC_DB_NAME") {
            self.store.database = val;
        }
        if let Ok(val) = std::env::var("SENSORSYNC_CONTAINER_NAME") {
            self.store.container = val;
        }
        if let Ok(val) = std::env::var("SENSORSYNC_MAX_ATTEMPTS")
            && let Ok(max_attempts) = val.parse()
        {
            self.ingest.max_attempts = max_attempts;
        }
        if let Ok(val) = std::env::var("SENSORSYNC_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::Validation(
                "max_body_bytes must be non-zero".to_string(),
            ));
        }
        if self.store.database.is_empty() {
            return Err(ConfigError::Validation(
                "database name must not be empty".to_string(),
            ));
        }
        if self.store.container.is_empty() {
            return Err(ConfigError::Validation(
                "container name must not be empty".to_string(),
            ));
        }
        if self.ingest.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7071,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:sensorsync.db?mode=rwc".to_string(),
            database: "SensorDB".to_string(),
            container: "Readings".to_string(),
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "sensorsyncd=info,sensorsync=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
