//! Configuration management for the financial query service
//!
//! Supports loading configuration from:
//! - YAML files (`config/default.yaml`, then `config/{env}.yaml`)
//! - Environment variables (`FINQUERY_` prefix)
//!
//! The intent table (which questions extract which parameters for which
//! formula) ships with built-in definitions matching the five supported
//! calculations and can be overridden from a YAML file.

pub mod intents;
pub mod settings;

pub use intents::{CalcFunction, IntentDefinition, IntentsConfig, ParameterSpec};
pub use settings::{
    load_settings, NluConfig, ObservabilityConfig, ServerConfig, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
