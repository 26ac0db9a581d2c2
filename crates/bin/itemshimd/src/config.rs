//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `itemshim.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use itemshim_adapter_storage_dynamodb::StoreConfig;
use itemshim_adapter_storage_dynamodb::store::{DEFAULT_REGION, DEFAULT_TABLE_NAME};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Backing store settings.
    pub store: StoreSection,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Synthetic delay and error injection.
    pub instrumentation: InstrumentationConfig,
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

/// `DynamoDB` table configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    pub table_name: String,
    pub region: String,
    /// Endpoint override, for `DynamoDB` Local.
    pub endpoint_url: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Fault injection toggle. Off unless explicitly enabled.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InstrumentationConfig {
    pub enabled: bool,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Config {
    /// Load configuration from `itemshim.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("itemshim.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
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

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("ITEMSHIM_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("ITEMSHIM_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("ITEMSHIM_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("TABLE_NAME") {
            self.store.table_name = val;
        }
        if let Some(val) = var("AWS_REGION") {
            self.store.region = val;
        }
        if let Some(val) = var("DYNAMODB_ENDPOINT") {
            self.store.endpoint_url = Some(val);
        }
        if let Some(val) = var("ITEMSHIM_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("ITEMSHIM_FAULTS") {
            self.instrumentation.enabled = matches!(val.as_str(), "1" | "true" | "yes" | "on");
        }
        if let Some(seed) = var("ITEMSHIM_FAULTS_SEED").and_then(|val| val.parse().ok()) {
            self.instrumentation.seed = Some(seed);
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.store.table_name.is_empty() {
            return Err(ConfigError::Validation(
                "table name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the storage adapter configuration.
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            table_name: self.store.table_name.clone(),
            region: self.store.region.clone(),
            endpoint_url: self.store.endpoint_url.clone(),
        }
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

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "itemshimd=info,itemshim=info,tower_http=debug".to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.store.table_name, "items");
        assert_eq!(config.store.region, "us-east-1");
        assert!(config.store.endpoint_url.is_none());
        assert!(!config.instrumentation.enabled);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [store]
            table_name = 'catalogue'
            region = 'eu-west-1'
            endpoint_url = 'http://localhost:8000'

            [logging]
            filter = 'debug'

            [instrumentation]
            enabled = true
            seed = 42
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
        assert_eq!(config.store.table_name, "catalogue");
        assert_eq!(config.store.region, "eu-west-1");
        assert_eq!(
            config.store.endpoint_url.as_deref(),
            Some("http://localhost:8000")
        );
        assert_eq!(config.logging.filter, "debug");
        assert!(config.instrumentation.enabled);
        assert_eq!(config.instrumentation.seed, Some(42));
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let config: Config = toml::from_str("[store]\ntable_name = 'x'").unwrap();
        assert_eq!(config.store.table_name, "x");
        assert_eq!(config.store.region, "us-east-1");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_apply_environment_overrides() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("TABLE_NAME", "prod-items"),
            ("AWS_REGION", "ap-south-1"),
            ("ITEMSHIM_BIND", "127.0.0.1:8081"),
            ("ITEMSHIM_FAULTS", "true"),
            ("ITEMSHIM_FAULTS_SEED", "9"),
        ]));

        assert_eq!(config.store.table_name, "prod-items");
        assert_eq!(config.store.region, "ap-south-1");
        assert_eq!(config.bind_addr(), "127.0.0.1:8081");
        assert!(config.instrumentation.enabled);
        assert_eq!(config.instrumentation.seed, Some(9));
    }

    #[test]
    fn should_prefer_rust_log_over_itemshim_log() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("ITEMSHIM_LOG", "warn"), ("RUST_LOG", "trace")]));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_keep_faults_disabled_for_other_values() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("ITEMSHIM_FAULTS", "maybe")]));
        assert!(!config.instrumentation.enabled);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_empty_table_name() {
        let mut config = Config::default();
        config.store.table_name = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn should_map_store_section_into_adapter_config() {
        let config = Config::default();
        assert_eq!(config.store_config(), StoreConfig::default());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
