//! Configuration management for the intake extraction engine
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`config/default`, `config/{env}`)
//! - Environment variables (INTAKE_ prefix, `__` as section separator)
//!
//! The extraction algorithms themselves are not configurable: stop-word
//! tables, suffix lists and default literals are compiled in. Only the LLM
//! collaborator and the SMS deadline are tunable.

pub mod constants;
pub mod settings;

pub use settings::{
    load_settings, load_settings_from, LlmProviderKind, LlmSettings, ObservabilityConfig,
    RuntimeEnvironment, Settings, SmsSettings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
