use anyhow::{Context, Result, anyhow};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

use crate::errors::StartupError;
use crate::language_utils::SupportedLanguage;
use crate::providers::gemini::{DEFAULT_API_VERSION, DEFAULT_ENDPOINT};

/// Application configuration module
/// This module handles loading, overriding and validating configuration
/// settings. The file is optional and is never written back.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Language selected as source when the session starts
    #[serde(default = "default_source_language")]
    pub source_language: SupportedLanguage,

    /// Language selected as target when the session starts
    #[serde(default = "default_target_language")]
    pub target_language: SupportedLanguage,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// API endpoint without version
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API version path segment
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Explicit model; skips discovery when set
    #[serde(default)]
    pub model: Option<String>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> SupportedLanguage {
    SupportedLanguage::English
}

fn default_target_language() -> SupportedLanguage {
    SupportedLanguage::Hindi
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

impl Config {
    /// Load the configuration file if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let file = File::open(path)
            .context(format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.api_key_env.trim().is_empty() {
            return Err(anyhow!("api_key_env must name an environment variable"));
        }

        if self.endpoint.trim().is_empty() {
            return Err(anyhow!("Endpoint cannot be empty"));
        }
        Url::parse(&self.endpoint)
            .context(format!("Invalid endpoint URL: {}", self.endpoint))?;

        if self.api_version.trim().is_empty() {
            return Err(anyhow!("API version cannot be empty"));
        }

        Ok(())
    }

    /// Read the API key from the environment
    ///
    /// Call `dotenv` first to pick up a `.env` file.
    pub fn api_key(&self) -> Result<String, StartupError> {
        self.api_key_from(|name| std::env::var(name).ok())
    }

    /// Read the API key through `lookup`; a blank value counts as missing
    pub fn api_key_from<F>(&self, lookup: F) -> Result<String, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(&self.api_key_env)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| StartupError::MissingCredential {
                variable: self.api_key_env.clone(),
            })
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            api_key_env: default_api_key_env(),
            endpoint: default_endpoint(),
            api_version: default_api_version(),
            model: None,
            log_level: LogLevel::default(),
        }
    }
}
