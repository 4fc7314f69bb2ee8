use crate::constants::{
    CONFIG_PATH, DEFAULT_REQUEST_TIMEOUT_SECS, ENV_API_URL, ENV_TIMEOUT_SECS, ENV_TOP_LIMIT,
    HMRC_API_URL, TOP_LIMIT,
};
use crate::error::{BenefitsError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub board: BoardConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub api_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub top_limit: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_url: HMRC_API_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            top_limit: TOP_LIMIT,
        }
    }
}

impl SourceConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Config {
    /// Load `config.toml` from the working directory (if present), then apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_PATH))?.with_overrides(|key| std::env::var(key).ok())
    }

    /// Read a config file; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(path)?;

        let config: Config = toml::from_str(&config_content)?;
        config.validate()
    }

    /// Apply overrides from a key lookup (the process environment in production).
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.source.api_url = url;
        }

        if let Some(raw) = lookup(ENV_TOP_LIMIT) {
            self.board.top_limit = raw.trim().parse().map_err(|_| {
                BenefitsError::Config(format!("{ENV_TOP_LIMIT} must be a positive integer, got '{raw}'"))
            })?;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.source.request_timeout_secs = raw.trim().parse().map_err(|_| {
                BenefitsError::Config(format!("{ENV_TIMEOUT_SECS} must be a number of seconds, got '{raw}'"))
            })?;
        }

        self.validate()
    }

    fn validate(self) -> Result<Self> {
        if self.source.api_url.trim().is_empty() {
            return Err(BenefitsError::Config("source.api_url must not be empty".into()));
        }
        if self.board.top_limit == 0 {
            return Err(BenefitsError::Config("board.top_limit must be at least 1".into()));
        }
        Ok(self)
    }
}
