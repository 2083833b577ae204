//! Application configuration

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Application configuration loaded from defaults, an optional
/// `grimoire.toml`, and environment variables (highest precedence)
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Base URL of the remote character store's REST API
    pub store_base_url: String,
    /// Public API key sent alongside the user's bearer token
    #[serde(default)]
    pub store_api_key: Option<String>,
    /// Timeout for a single store request
    pub request_timeout_secs: u64,

    /// Baseline spell catalog
    pub spells_path: PathBuf,
    /// Class catalog
    pub classes_path: PathBuf,
    /// Richer spell dataset preferred over the baseline when it loads
    #[serde(default)]
    pub alternate_spells_path: Option<PathBuf>,

    /// HTTP server port
    pub server_port: u16,
    /// Sessions whose character lists are kept cached
    pub cache_capacity: usize,
    /// How long a cached character list is served before refetching
    pub cache_ttl_secs: u64,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::load(Environment::default())
    }

    fn load(environment: Environment) -> Result<Self> {
        let mut config: AppConfig = Config::builder()
            .set_default("store_base_url", "http://localhost:54321/rest/v1")?
            .set_default("request_timeout_secs", 15)?
            .set_default("spells_path", "data/spells.json")?
            .set_default("classes_path", "data/classes.json")?
            .set_default("server_port", 3000)?
            .set_default("cache_capacity", 256)?
            .set_default("cache_ttl_secs", 30)?
            .add_source(File::with_name("grimoire").required(false))
            .add_source(environment.try_parsing(true))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        // An empty variable means "not set"
        config.store_api_key = config.store_api_key.filter(|key| !key.trim().is_empty());
        config.alternate_spells_path = config
            .alternate_spells_path
            .filter(|path| !path.as_os_str().is_empty());
        config.store_base_url = config.store_base_url.trim_end_matches('/').to_string();

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::default().source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::load(environment(&[])).unwrap();
        assert_eq!(config.store_base_url, "http://localhost:54321/rest/v1");
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.spells_path, PathBuf::from("data/spells.json"));
        assert!(config.alternate_spells_path.is_none());
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
        assert_eq!(config.cache_ttl(), Duration::from_secs(30));
    }

    #[test]
    fn test_environment_overrides() {
        let config = AppConfig::load(environment(&[
            ("STORE_BASE_URL", "https://store.example.com/rest/v1/"),
            ("STORE_API_KEY", "anon-key"),
            ("SERVER_PORT", "8080"),
            ("CACHE_TTL_SECS", "0"),
            ("ALTERNATE_SPELLS_PATH", "data/srd_spells.json"),
        ]))
        .unwrap();
        assert_eq!(config.store_base_url, "https://store.example.com/rest/v1");
        assert_eq!(config.store_api_key.as_deref(), Some("anon-key"));
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.cache_ttl(), Duration::ZERO);
        assert_eq!(
            config.alternate_spells_path,
            Some(PathBuf::from("data/srd_spells.json"))
        );
    }

    #[test]
    fn test_blank_optional_values_are_unset() {
        let config = AppConfig::load(environment(&[
            ("STORE_API_KEY", " "),
            ("ALTERNATE_SPELLS_PATH", ""),
        ]))
        .unwrap();
        assert!(config.store_api_key.is_none());
        assert!(config.alternate_spells_path.is_none());
    }
}
