//! Per-request types exchanged between pipeline stages.
//!
//! Nothing here persists beyond one request/response cycle; the service is
//! fully stateless across requests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DispatchError;
use crate::intent::IntentKind;

/// Parameter name -> numeric value, as extracted by question answering.
/// Every key present is a parameter name declared for the active intent.
pub type ExtractedEntities = HashMap<String, f64>;

/// Math-function argument name -> normalized numeric value, derived from
/// [`ExtractedEntities`] by the unit normalizer.
pub type CalculationArgs = HashMap<String, f64>;

/// Successful calculation: the raw numeric value plus its formatted,
/// human-readable rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Unrounded result of the formula.
    pub value: f64,
    /// Display string, e.g. "The Future Value is: $1,628.89".
    pub text: String,
}

/// Full account of how one query was handled.
///
/// Partial progress (interpreted intent, extracted values) is retained even
/// when a later stage fails, to aid debugging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryReport {
    /// Correlation id for logs.
    pub request_id: Uuid,
    /// Committed intent, if classification succeeded.
    pub intent: Option<IntentKind>,
    /// Classifier confidence for the committed intent, in [0, 1].
    pub confidence: f32,
    /// Entities extracted before any failure (possibly partial).
    pub extracted: ExtractedEntities,
    /// The calculation, when all stages succeeded.
    pub result: Option<CalculationResult>,
    /// The failure, when any stage short-circuited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<DispatchErrorInfo>,
    /// Plain-text trace of the interpretation and formula invocation,
    /// intended for display, not machine parsing.
    pub details: String,
}

/// Serializable view of a [`DispatchError`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchErrorInfo {
    /// Machine-readable kind, e.g. "required_parameters_missing".
    pub kind: String,
    /// User-facing message.
    pub message: String,
}

impl From<&DispatchError> for DispatchErrorInfo {
    fn from(err: &DispatchError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

impl QueryReport {
    /// Start an empty report for a new request.
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            intent: None,
            confidence: 0.0,
            extracted: ExtractedEntities::new(),
            result: None,
            error: None,
            details: String::new(),
        }
    }

    /// Whether the query produced a calculation.
    pub fn is_success(&self) -> bool {
        self.result.is_some() && self.error.is_none()
    }

    /// The string shown to the user: the result text on success, the error
    /// message otherwise.
    pub fn display_text(&self) -> &str {
        if let Some(result) = &self.result {
            &result.text
        } else if let Some(error) = &self.error {
            &error.message
        } else {
            ""
        }
    }
}

impl Default for QueryReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text_prefers_result() {
        let mut report = QueryReport::new();
        report.result = Some(CalculationResult {
            value: 1628.89,
            text: "The Future Value is: $1,628.89".to_string(),
        });
        assert!(report.is_success());
        assert_eq!(report.display_text(), "The Future Value is: $1,628.89");
    }

    #[test]
    fn test_display_text_falls_back_to_error() {
        let mut report = QueryReport::new();
        report.error = Some((&DispatchError::IntentUnrecognized).into());
        assert!(!report.is_success());
        assert!(report.display_text().contains("Could not understand"));
    }
}
