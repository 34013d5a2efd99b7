//! `AppConfig` struct and TOML read/write.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use anidex_api::anilist::{
    AniListClient, AniListClientBuilder, DEFAULT_BASE_DELAY, DEFAULT_ENDPOINT,
    DEFAULT_MAX_ATTEMPTS, DEFAULT_MIN_INTERVAL,
};
use serde::{Deserialize, Serialize};
use url::Url;

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// `AniList` API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Display preferences.
    #[serde(default)]
    pub display: DisplayConfig,
}

/// `AniList` API settings.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    /// GraphQL endpoint.
    pub endpoint: String,
    /// `Origin` header override for proxied endpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Minimum interval between requests in milliseconds.
    pub min_interval_ms: u64,
    /// Dispatch attempts per request.
    pub max_attempts: u32,
    /// Delay before the first retry in milliseconds (doubles each retry).
    pub base_delay_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: String::from(DEFAULT_ENDPOINT),
            origin: None,
            min_interval_ms: u64::try_from(DEFAULT_MIN_INTERVAL.as_millis()).unwrap_or(700),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay_ms: u64::try_from(DEFAULT_BASE_DELAY.as_millis()).unwrap_or(1000),
        }
    }
}

impl ApiConfig {
    /// Creates a client builder from these settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `endpoint` is not a valid URL.
    pub fn client_builder(&self) -> Result<AniListClientBuilder> {
        let endpoint = Url::parse(&self.endpoint)
            .with_context(|| format!("invalid api.endpoint: {}", self.endpoint))?;

        let mut builder = AniListClient::builder()
            .endpoint(endpoint)
            .min_interval(Duration::from_millis(self.min_interval_ms))
            .max_attempts(self.max_attempts)
            .base_delay(Duration::from_millis(self.base_delay_ms));
        if let Some(ref origin) = self.origin {
            builder = builder.origin(origin.clone());
        }
        Ok(builder)
    }
}

/// Display preferences.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Color theme.
    #[serde(default)]
    pub theme: Theme,
}

/// Color theme preference.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

impl Theme {
    /// Returns the opposite theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Dark => f.write_str("dark"),
        }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}
