//! Backend traits for pluggable inference engines.
//!
//! The classifier and extractor delegate to external pretrained models.
//! These traits are the seam: the `nlu` crate ships HTTP sidecar
//! implementations, and tests substitute scripted fakes.

mod classifier;
mod qa;

pub use classifier::{LabelScore, ZeroShotBackend};
pub use qa::{ExtractiveQaBackend, QaAnswer};

use thiserror::Error;

/// Fault raised by an inference backend.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("Backend request failed: {0}")]
    Request(String),

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    #[error("Backend request timed out")]
    Timeout,
}
