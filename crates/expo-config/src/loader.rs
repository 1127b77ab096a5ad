//! Configuration loading utilities

use crate::Config;
use expo_common::Result as ExpoResult;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "EXPO_CONFIG_PATH";

/// File names probed, in order, when no explicit path is given
const CANDIDATE_FILES: [&str; 3] = ["config.yaml", "config.yml", "config.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for expo_common::ExpoError {
    fn from(err: ConfigError) -> Self {
        expo_common::ExpoError::config_with_source("Failed to load configuration", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML or TOML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let mut config: Config = if is_toml {
            toml::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        debug!(path = %path.display(), "Parsed configuration file");

        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from `EXPO_CONFIG_PATH`, then well-known files in the
    /// working directory, then built-in defaults
    pub fn load() -> ExpoResult<Config> {
        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            return Self::load_from_file(config_path);
        }
        Ok(Self::discover(Path::new("."))?)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ExpoResult<Config> {
        info!(path = %path.as_ref().display(), "Loading configuration");
        Ok(Self::load_config(path)?)
    }

    /// Probe `dir` for a config file, falling back to defaults with env overrides
    pub fn discover(dir: &Path) -> Result<Config, ConfigError> {
        if let Some(found) = Self::find_config_file(dir) {
            info!(path = %found.display(), "Loading configuration");
            return Self::load_config(found);
        }

        info!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    fn find_config_file(dir: &Path) -> Option<PathBuf> {
        CANDIDATE_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        if let Ok(origin) = env::var("EXPO_SITE_ORIGIN") {
            config.site.origin = origin;
        }

        if let Ok(keyword) = env::var("EXPO_SEARCH_KEYWORD") {
            config.site.search_keyword = keyword;
        }

        if let Some(year) = parse_env("EXPO_EVENT_YEAR")? {
            config.scrape.event_year = year;
        }

        if let Some(timeout) = parse_env("EXPO_TIMEOUT_SECONDS")? {
            config.scrape.timeout_seconds = timeout;
        }

        if let Ok(user_agent) = env::var("EXPO_USER_AGENT") {
            config.scrape.user_agent = user_agent;
        }

        if let Ok(bind) = env::var("EXPO_BIND") {
            config.dashboard.bind = bind;
        }

        if let Ok(dir) = env::var("EXPO_FONT_DIR") {
            config.fonts.dir = dir;
        }

        if let Ok(hint) = env::var("EXPO_FONT_FAMILY_HINT") {
            config.fonts.family_hint = hint;
        }

        if let Some(width) = parse_env("CHART_WIDTH")? {
            config.chart.width = width;
        }

        if let Some(height) = parse_env("CHART_HEIGHT")? {
            config.chart.height = height;
        }

        if let Ok(level) = env::var("LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(file) = env::var("LOG_FILE") {
            config.logging.file = Some(file);
        }

        if let Some(json) = parse_env("LOG_JSON")? {
            config.logging.json = json;
        }

        Ok(())
    }
}

/// Read and parse an optional environment variable
fn parse_env<T>(var: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ConfigError::EnvParseError {
                var: var.to_string(),
                source: Box::new(e),
            }),
        Err(_) => Ok(None),
    }
}
