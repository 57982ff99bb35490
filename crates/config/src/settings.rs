//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// NLU backend configuration (inference sidecars)
    #[serde(default)]
    pub nlu: NluConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Optional path to an intent-table override file (YAML)
    #[serde(default)]
    pub intents_path: Option<String>,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins (empty = localhost only)
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Whether CORS restrictions are enforced
    #[serde(default = "default_true")]
    pub cors_enabled: bool,
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            cors_origins: Vec::new(),
            cors_enabled: true,
        }
    }
}

/// NLU backend configuration.
///
/// Both models run in an external inference sidecar; the service only
/// issues HTTP calls against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NluConfig {
    /// Base URL of the zero-shot classification sidecar
    #[serde(default = "default_classifier_url")]
    pub classifier_url: String,
    /// Base URL of the question-answering sidecar
    #[serde(default = "default_qa_url")]
    pub qa_url: String,
    /// Request timeout in milliseconds for either sidecar
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Minimum QA score to accept an answer span.
    /// The reference value (0.1) is a low, untuned bar.
    #[serde(default = "default_qa_min_score")]
    pub qa_min_score: f32,
}

fn default_classifier_url() -> String {
    "http://127.0.0.1:8091".to_string()
}

fn default_qa_url() -> String {
    "http://127.0.0.1:8092".to_string()
}

fn default_timeout_ms() -> u64 {
    30000
}

fn default_qa_min_score() -> f32 {
    0.1
}

impl Default for NluConfig {
    fn default() -> Self {
        Self {
            classifier_url: default_classifier_url(),
            qa_url: default_qa_url(),
            timeout_ms: default_timeout_ms(),
            qa_min_score: default_qa_min_score(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level for the env filter fallback (trace/debug/info/warn/error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit logs as JSON lines
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nlu.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "nlu.timeout_ms".to_string(),
                message: "timeout must be greater than zero".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.nlu.qa_min_score) {
            return Err(ConfigError::InvalidValue {
                field: "nlu.qa_min_score".to_string(),
                message: "score threshold must be within [0, 1]".to_string(),
            });
        }
        for url in [&self.nlu.classifier_url, &self.nlu.qa_url] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    field: "nlu".to_string(),
                    message: format!("sidecar URL must be http(s): {url}"),
                });
            }
        }
        Ok(())
    }
}

/// Load settings from files and environment.
///
/// Priority: env vars > `config/{env}.yaml` > `config/default.yaml` > defaults.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    if Path::new("config/default.yaml").exists() {
        builder = builder.add_source(File::with_name("config/default"));
    }
    if let Some(env_name) = env {
        let env_file = format!("config/{env_name}");
        if Path::new(&format!("{env_file}.yaml")).exists() {
            builder = builder.add_source(File::with_name(&env_file));
        }
    }

    let config = builder
        .add_source(Environment::with_prefix("FINQUERY").separator("__"))
        .build()?;

    let settings: Settings = config.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}
