use std::path::Path;
use std::time::Duration;
use serde::Deserialize;
use anyhow::{Context, Result};
use shared::protocol::{DEFAULT_DOMAIN, REMO_SERVICE_TYPE};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Discovery runs on its own deadline, unrelated to the HTTP one.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
    #[serde(default = "default_service_type")]
    pub service_type: String,
    #[serde(default = "default_domain")]
    pub domain: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_service_type() -> String {
    REMO_SERVICE_TYPE.to_string()
}

fn default_domain() -> String {
    DEFAULT_DOMAIN.to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            service_type: default_service_type(),
            domain: default_domain(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl DiscoveryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.discovery.service_type, "_remo._tcp");
        assert_eq!(config.discovery.domain, "local.");
        assert_eq!(config.discovery.timeout(), Duration::from_secs(5));
        assert_eq!(config.http.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_partial_sections() {
        let config: Config = toml::from_str(
            r#"
            [discovery]
            timeout_secs = 2

            [http]
            timeout_secs = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.discovery.service_type, "_remo._tcp");
        assert_eq!(config.discovery.timeout_secs, 2);
        assert_eq!(config.http.timeout_secs, 10);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("localremo.toml");
        std::fs::write(&path, "[discovery]\nservice_type = \"_remo-mini._tcp\"\ntimeout_secs = 3\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.discovery.service_type, "_remo-mini._tcp");
        assert_eq!(config.discovery.domain, "local.");
        assert_eq!(config.discovery.timeout_secs, 3);

        let missing = Config::load(dir.path().join("missing.toml"));
        assert!(missing.is_err());
    }
}
