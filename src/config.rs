//! Application configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use mastermind_core::{Difficulty, GameConfig, Symbol, SymbolRange};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Where secrets come from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SourceKind {
    /// Local pseudo-random generator.
    #[default]
    Local,
    /// The random.org integer generator over HTTP.
    RandomOrg,
}

/// Settings for games started by this application.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Code length.
    #[serde(default = "default_symbol_count")]
    symbol_count: usize,

    /// Smallest symbol value.
    #[serde(default = "default_lower_bound")]
    lower_bound: Symbol,

    /// Largest symbol value.
    #[serde(default = "default_upper_bound")]
    upper_bound: Symbol,

    /// Guesses per game.
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,

    /// Secret provider.
    #[serde(default)]
    source: SourceKind,

    /// Seed for reproducible local secrets.
    #[serde(default)]
    seed: Option<u64>,

    /// Endpoint of the random.org integer generator.
    #[serde(default = "default_random_org_url")]
    random_org_url: String,

    /// Timeout for remote secret requests, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,
}

fn default_symbol_count() -> usize {
    Difficulty::default().symbol_count()
}

fn default_lower_bound() -> Symbol {
    SymbolRange::default().lower()
}

fn default_upper_bound() -> Symbol {
    SymbolRange::default().upper()
}

fn default_max_attempts() -> u32 {
    mastermind_core::DEFAULT_MAX_ATTEMPTS
}

fn default_random_org_url() -> String {
    "https://www.random.org/integers/".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            symbol_count: default_symbol_count(),
            lower_bound: default_lower_bound(),
            upper_bound: default_upper_bound(),
            max_attempts: default_max_attempts(),
            source: SourceKind::default(),
            seed: None,
            random_org_url: default_random_org_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            symbol_count = config.symbol_count,
            source = %config.source,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Applies a difficulty preset's code length.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.symbol_count = difficulty.symbol_count();
        self
    }

    /// Overrides the secret provider.
    pub fn with_source(mut self, source: SourceKind) -> Self {
        self.source = source;
        self
    }

    /// Sets a seed for reproducible local secrets.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validated game rules described by this configuration.
    #[instrument(skip(self))]
    pub fn game_config(&self) -> Result<GameConfig, ConfigError> {
        let range = SymbolRange::new(self.lower_bound, self.upper_bound)
            .map_err(|e| ConfigError::new(e.to_string()))?;
        GameConfig::new(self.symbol_count, range, self.max_attempts)
            .map_err(|e| ConfigError::new(e.to_string()))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
