use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::paths::PathManager;

pub const DEFAULT_TXT: &str = "amazon-meta.txt";
pub const DEFAULT_JSON_REVIEWS: &str = "reviews_Amazon_Instant_Video.json";
pub const DEFAULT_JSON_META: &str = "meta_Amazon_Instant_Video.json";
pub const DEFAULT_OUTPUT: &str = "combined_amazon_reviews.json";
pub const DEFAULT_FORMAT: &str = "json";
pub const DEFAULT_SAMPLES: usize = 10_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Settings read from `config.toml`. Every section and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub inputs: InputConfig,
    pub output: OutputConfig,
    pub sampling: SamplingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Legacy `amazon-meta.txt` dump
    pub txt: PathBuf,
    pub json_reviews: PathBuf,
    pub json_meta: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            txt: PathBuf::from(DEFAULT_TXT),
            json_reviews: PathBuf::from(DEFAULT_JSON_REVIEWS),
            json_meta: PathBuf::from(DEFAULT_JSON_META),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    /// csv, json or excel
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT),
            format: DEFAULT_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// 0 = unlimited
    pub samples: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write logs to this file (rotated daily) instead of stderr
    pub file: Option<PathBuf>,
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `explicit` if given (it must exist), otherwise the default config
    /// file when present, otherwise built-in defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        match PathManager::new().map(|paths| paths.config_file()) {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let paths = [
            ("inputs.txt", &self.inputs.txt),
            ("inputs.json_reviews", &self.inputs.json_reviews),
            ("inputs.json_meta", &self.inputs.json_meta),
            ("output.path", &self.output.path),
        ];
        for (key, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(format!("{} must not be empty", key)));
            }
        }

        if self.output.format.trim().is_empty() {
            return Err(ConfigError::Invalid("output.format must not be empty".to_string()));
        }

        Ok(())
    }
}
