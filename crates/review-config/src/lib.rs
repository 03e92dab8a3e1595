pub mod config;
pub mod paths;

pub use config::{
    Config, ConfigError, InputConfig, LoggingConfig, OutputConfig, SamplingConfig, DEFAULT_FORMAT,
    DEFAULT_JSON_META, DEFAULT_JSON_REVIEWS, DEFAULT_OUTPUT, DEFAULT_SAMPLES, DEFAULT_TXT,
};
pub use paths::{PathManager, CONFIG_DIR_ENV};
