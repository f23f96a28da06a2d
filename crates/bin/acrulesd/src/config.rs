//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `acrules.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Control loop settings.
    pub controller: ControllerConfig,
    /// Virtual sensor settings.
    pub sensor: SensorConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Seconds between two control cycles.
    pub interval_secs: u64,
    /// Re-transmit on every cycle.
    pub debug_mode: bool,
    /// Upper bound on stored rules.
    pub max_rules: usize,
    /// Insert the starter rules into an empty store.
    pub seed_defaults: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Reading reported by the virtual sensor at startup, in °C.
    pub initial_temp: f32,
}

impl Config {
    /// Load configuration from `acrules.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting values are invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("acrules.toml")?;
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
        if let Ok(val) = std::env::var("ACRULES_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("ACRULES_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("ACRULES_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("ACRULES_DATABASE_URL") {
            self.database.url = val;
        }
        if let Ok(val) = std::env::var("ACRULES_LOG") {
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
        if self.controller.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "controller.interval_secs must be non-zero".to_string(),
            ));
        }
        if self.controller.max_rules == 0 {
            return Err(ConfigError::Validation(
                "controller.max_rules must be non-zero".to_string(),
            ));
        }
        if !self.sensor.initial_temp.is_finite() {
            return Err(ConfigError::Validation(
                "sensor.initial_temp must be a finite number".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Time between control cycles.
    #[must_use]
    pub fn control_interval(&self) -> Duration {
        Duration::from_secs(self.controller.interval_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:acrules.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "acrulesd=info,acrules=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            interval_secs: acrules_app::control_loop::DEFAULT_INTERVAL.as_secs(),
            debug_mode: false,
            max_rules: acrules_app::services::rule_service::DEFAULT_MAX_RULES,
            seed_defaults: true,
        }
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self { initial_temp: 25.0 }
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
