//! Application State
//!
//! Shared state across all handlers. The service is stateless per request:
//! the only shared pieces are the hot-reloadable settings, the immutable
//! intent table, and the dispatcher over the read-only inference backends.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use parking_lot::RwLock;

use finquery_agent::Dispatcher;
use finquery_config::{load_settings, IntentsConfig, Settings};
use finquery_nlu::{
    EntityExtractor, HttpQaBackend, HttpZeroShotBackend, IntentClassifier, QaHttpConfig,
    ZeroShotHttpConfig,
};

use crate::ServerError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Configuration wrapped in RwLock for hot-reload support
    pub config: Arc<RwLock<Settings>>,
    /// Intent table (immutable after startup)
    pub intents: Arc<IntentsConfig>,
    /// Query dispatcher
    pub dispatcher: Arc<Dispatcher>,
    /// Render handle for the Prometheus exposition endpoint
    pub metrics_handle: Option<PrometheusHandle>,
    /// Environment name for config reload
    env: Option<String>,
}

impl AppState {
    /// Build state from settings: loads the intent table and wires the
    /// HTTP inference backends into the dispatcher.
    ///
    /// Sidecar URLs and timeouts are applied at startup; a config reload
    /// does not rebind them.
    pub fn from_settings(config: Settings, env: Option<String>) -> Result<Self, ServerError> {
        let intents = match &config.intents_path {
            Some(path) => {
                tracing::info!(path = %path, "Loading intent table override");
                Arc::new(IntentsConfig::load(path)?)
            }
            None => Arc::new(IntentsConfig::builtin()),
        };

        let zero_shot = HttpZeroShotBackend::new(ZeroShotHttpConfig {
            url: config.nlu.classifier_url.clone(),
            timeout_ms: config.nlu.timeout_ms,
        })?;
        let qa = HttpQaBackend::new(QaHttpConfig {
            url: config.nlu.qa_url.clone(),
            timeout_ms: config.nlu.timeout_ms,
        })?;

        let classifier = IntentClassifier::new(Arc::new(zero_shot), &intents);
        let extractor = EntityExtractor::new(Arc::new(qa), config.nlu.qa_min_score);
        let dispatcher = Arc::new(Dispatcher::new(classifier, extractor, intents.clone()));

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            intents,
            dispatcher,
            metrics_handle: None,
            env,
        })
    }

    /// Attach the Prometheus render handle.
    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics_handle = handle;
        self
    }

    /// Reload configuration from files.
    ///
    /// Updates the shared settings; backend bindings and the intent table
    /// keep their startup values.
    pub fn reload_config(&self) -> Result<(), String> {
        let new_config = load_settings(self.env.as_deref())
            .map_err(|e| format!("Failed to reload config: {e}"))?;

        let mut config = self.config.write();
        *config = new_config;

        tracing::info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Get a read guard to the current configuration
    pub fn get_config(&self) -> parking_lot::RwLockReadGuard<'_, Settings> {
        self.config.read()
    }
}
