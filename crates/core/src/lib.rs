//! Core traits and types for the financial query service
//!
//! This crate provides foundational types used across all other crates:
//! - The five recognized calculation intents
//! - Entity and argument maps exchanged between pipeline stages
//! - The dispatch error taxonomy
//! - Backend traits for pluggable inference engines (zero-shot
//!   classification, extractive question answering)

pub mod error;
pub mod intent;
pub mod query;
pub mod traits;

pub use error::DispatchError;
pub use intent::IntentKind;
pub use query::{
    CalculationArgs, CalculationResult, DispatchErrorInfo, ExtractedEntities, QueryReport,
};
pub use traits::{BackendError, ExtractiveQaBackend, LabelScore, QaAnswer, ZeroShotBackend};
