//! HTTP server for the financial query service
//!
//! Serves the HTML query form, a JSON API, health/readiness probes,
//! Prometheus metrics, and a config-reload admin endpoint.

pub mod http;
pub mod metrics;
pub mod pages;
pub mod state;

pub use http::create_router;
pub use metrics::init_metrics;
pub use state::AppState;

use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] finquery_config::ConfigError),

    #[error("NLU backend error: {0}")]
    Nlu(#[from] finquery_nlu::NluError),
}
