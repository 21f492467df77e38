use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::shared::{IrrError, Result};

pub const DEFAULT_REGISTRY_URL: &str = "https://www.radb.net/query";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry: RegistryConfig::default(),
            resolver: ResolverConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResolverConfig {
    /// Upper bound on registry queries for a single resolution.
    #[serde(default = "default_max_queries")]
    pub max_queries: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_queries: default_max_queries(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_url() -> String {
    DEFAULT_REGISTRY_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_queries() -> usize {
    1000
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: Config =
            serde_yml::from_str(contents).map_err(|e| IrrError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.resolver.max_queries == 0 {
            return Err(IrrError::Config(
                "resolver.max_queries must be at least 1".to_string(),
            ));
        }
        if self.registry.timeout_secs == 0 {
            return Err(IrrError::Config(
                "registry.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Read a YAML file. `None` when the file does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            IrrError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&contents).map(Some)
    }

    /// Load configuration from a YAML file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        match Self::read(path)? {
            Some(config) => Ok(config),
            None => {
                warn!(path = %path.display(), "configuration file not found; using defaults");
                Ok(Config::default())
            }
        }
    }

    /// Apply command-line overrides, checked the same way as file values.
    pub fn apply_overrides(
        &mut self,
        registry_url: Option<&str>,
        timeout_secs: Option<u64>,
        max_queries: Option<usize>,
    ) -> Result<()> {
        if let Some(url) = registry_url {
            self.registry.url = url.to_string();
        }
        if let Some(secs) = timeout_secs {
            self.registry.timeout_secs = secs;
        }
        if let Some(max) = max_queries {
            self.resolver.max_queries = max;
        }
        self.validate()
    }
}
