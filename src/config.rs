//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the benefits backend
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry attempts for server errors
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Base delay between retries in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Random jitter added to each retry delay (0 to this value)
    #[serde(default = "default_retry_jitter_ms")]
    pub retry_jitter_ms: u64,

    /// Page size used when pulling the raw catalog from the backend
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: u32,

    /// Page size for query results
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Maximum number of accumulated results to display
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Use the built-in sample catalog instead of the backend
    #[serde(default)]
    pub sample: bool,

    /// Number of records in the sample catalog
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Seed for the sample catalog's day shuffle
    #[serde(default = "default_sample_seed")]
    pub sample_seed: u64,
}

fn default_api_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_retry_jitter_ms() -> u64 {
    250
}

fn default_fetch_limit() -> u32 {
    100
}

fn default_limit() -> u32 {
    20
}

fn default_max_results() -> usize {
    60
}

fn default_sample_size() -> usize {
    140
}

fn default_sample_seed() -> u64 {
    7
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            retries: default_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            retry_jitter_ms: default_retry_jitter_ms(),
            fetch_limit: default_fetch_limit(),
            limit: default_limit(),
            max_results: default_max_results(),
            format: OutputFormat::Table,
            sample: false,
            sample_size: default_sample_size(),
            sample_seed: default_sample_seed(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("perks-cli").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(url) = std::env::var("PERKS_API_URL") {
            self.api_url = url;
        }

        if let Ok(timeout) = std::env::var("PERKS_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.timeout_secs = t;
            }
        }

        if let Ok(max) = std::env::var("PERKS_MAX") {
            if let Ok(m) = max.parse() {
                self.max_results = m;
            }
        }

        self
    }

    /// Default location of the session file holding the filter state.
    pub fn default_session_path() -> Option<std::path::PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("perks-cli").join("session.json"))
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
