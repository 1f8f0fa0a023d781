//! Client configuration.
//!
//! The base location is supplied by the deployment (environment or a TOML
//! file); the client only ever appends the path prefix and an endpoint to it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const ENV_BASE_URL: &str = "NITMAN_API_BASE_URL";
pub const ENV_PREFIX: &str = "NITMAN_API_PREFIX";
pub const ENV_CREDENTIALS: &str = "NITMAN_API_CREDENTIALS";

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_PREFIX: &str = "/api";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Where the proxy serving the prefix lives, e.g. `http://localhost:3000`.
    pub base_url: String,

    /// Fixed prefix every endpoint is addressed under.
    pub path_prefix: String,

    /// Send and accept cookies so server-side sessions are honored.
    pub include_credentials: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            path_prefix: DEFAULT_PREFIX.to_string(),
            include_credentials: true,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
        .normalized()
    }

    /// Read the configuration from `NITMAN_API_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(prefix) = lookup(ENV_PREFIX) {
            config.path_prefix = prefix;
        }
        if let Some(flag) = lookup(ENV_CREDENTIALS) {
            config.include_credentials = parse_flag(&flag);
        }

        let config = config.normalized();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(content)?;
        let config = config.normalized();
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.base_url)
            .map(|_| ())
            .map_err(|source| ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                source,
            })
    }

    /// Trim trailing slashes and make sure a non-empty prefix starts with `/`.
    pub fn normalized(mut self) -> Self {
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        self.path_prefix = normalize_prefix(&self.path_prefix);
        self
    }
}

pub(crate) fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_end_matches('/');
    if trimmed.is_empty() || trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
