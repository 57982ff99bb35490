//! NLU layer: intent classification and entity extraction
//!
//! Both pretrained models (zero-shot classification, extractive question
//! answering) run in external inference sidecars; this crate talks to them
//! over HTTP and applies the decision rules on top:
//! - classifier faults never surface as errors, only as "no intent"
//! - QA answers below the score threshold are treated as absent
//! - answer spans are reduced to numbers by a best-effort regex parser

pub mod classifier;
pub mod extractor;
pub mod numeric;
pub mod zero_shot;
pub mod qa;

pub use classifier::IntentClassifier;
pub use extractor::{EntityExtractor, ExtractionOutcome};
pub use numeric::parse_numeric;
pub use qa::{HttpQaBackend, QaHttpConfig};
pub use zero_shot::{HttpZeroShotBackend, ZeroShotHttpConfig};

use thiserror::Error;

/// NLU errors. Request-time faults are reported as
/// [`finquery_core::BackendError`] by the backend traits; this type only
/// covers backend construction.
#[derive(Error, Debug)]
pub enum NluError {
    #[error("Configuration error: {0}")]
    Configuration(String),
}
