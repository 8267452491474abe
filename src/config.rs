//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub query: QueryConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Interactive query settings
#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    /// Levels walked by the `all` command, in order
    #[serde(default = "default_levels")]
    pub levels: Vec<String>,
}

fn default_levels() -> Vec<String> {
    ["DEBUG", "INFO", "WARN", "ERROR", "FATAL"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            levels: default_levels(),
        }
    }
}

/// How results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Log lines verbatim with headers and counts
    #[default]
    Text,
    /// One JSON object per match plus a summary object
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}. Use: text, json", other)),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("logindex").join("config.toml")),
            Some(PathBuf::from("/etc/logindex/config.toml")),
            Some(PathBuf::from("./logindex.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Logging overrides
        if let Some(level) = var("LOGINDEX_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("LOGINDEX_LOG_FORMAT") {
            self.logging.format = format;
        }

        // Output overrides
        if let Some(format) = var("LOGINDEX_OUTPUT_FORMAT") {
            match format.parse() {
                Ok(format) => self.output.format = format,
                Err(e) => tracing::warn!("Ignoring LOGINDEX_OUTPUT_FORMAT: {}", e),
            }
        }

        // Query overrides
        if let Some(levels) = var("LOGINDEX_LEVELS") {
            let levels: Vec<String> = levels
                .split(',')
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .collect();
            if !levels.is_empty() {
                self.query.levels = levels;
            }
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# logindex Configuration
#
# Environment variables override these settings:
# - LOGINDEX_LOG_LEVEL
# - LOGINDEX_LOG_FORMAT
# - LOGINDEX_OUTPUT_FORMAT
# - LOGINDEX_LEVELS (comma separated)

[logging]
# Log level: trace, debug, info, warn, error (RUST_LOG takes precedence)
level = "warn"

# Log format: pretty or json
format = "pretty"

[query]
# Levels shown by the interactive `all` command
levels = ["DEBUG", "INFO", "WARN", "ERROR", "FATAL"]

[output]
# Result format: text or json
format = "text"
"#
    .to_string()
}
