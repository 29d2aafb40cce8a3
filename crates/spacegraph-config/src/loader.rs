//! Configuration loading utilities

use crate::schema::Config;
use crate::validator::ConfigValidator;
use spacegraph_common::{Result as SpaceGraphResult, SpaceGraphError};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_VAR: &str = "SPACEGRAPH_CONFIG_PATH";

/// Files probed in the working directory when no path is given
pub const DEFAULT_CONFIG_FILES: [&str; 3] = ["spacegraph.yaml", "spacegraph.yml", "spacegraph.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// File extension that maps to no known format
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration validation error
    #[error(transparent)]
    ValidationError(#[from] SpaceGraphError),
}

impl From<ConfigError> for SpaceGraphError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ValidationError(inner) => inner,
            other => SpaceGraphError::config_with_source("Failed to load configuration", other),
        }
    }
}

/// Serialization format of a configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the environment-selected file, a default file, or defaults.
    pub fn load() -> SpaceGraphResult<Config> {
        let path = env::var(CONFIG_PATH_VAR)
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                DEFAULT_CONFIG_FILES
                    .iter()
                    .map(PathBuf::from)
                    .find(|candidate| candidate.exists())
            });

        let config = match path {
            Some(path) => Self::load_config(&path)?,
            None => {
                info!("No configuration file found, using defaults");
                Self::finish(Config::default())?
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SpaceGraphResult<Config> {
        Ok(Self::load_config(path.as_ref())?)
    }

    /// Read, parse, override from the environment, and validate
    pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
        info!("Loading configuration from {}", path.display());
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;

        Self::finish(Self::parse(&content, format)?)
    }

    /// Parse configuration text without overrides or validation
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Config, ConfigError> {
        Ok(match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        })
    }

    fn finish(mut config: Config) -> Result<Config, ConfigError> {
        Self::apply_overrides(&mut config, |var| env::var(var).ok())?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in production)
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = lookup("NASA_API_KEY") {
            debug!("Using NASA API key from environment");
            config.nasa.api_key = api_key;
        }

        if let Some(url) = lookup("NASA_API_URL") {
            config.nasa.base_url = url;
        }

        if let Some(timeout) = lookup("NASA_TIMEOUT") {
            config.nasa.timeout_secs = timeout.parse().map_err(|e| ConfigError::EnvParseError {
                var: "NASA_TIMEOUT".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Some(rover) = lookup("NASA_ROVER") {
            config.nasa.rover = rover;
        }

        if let Some(directory) = lookup("SPACEGRAPH_OUTPUT_DIR") {
            config.output.directory = PathBuf::from(directory);
        }

        if let Some(level) = lookup("SPACEGRAPH_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}
