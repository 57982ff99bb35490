//! Dispatch error taxonomy.
//!
//! Every stage-level fault is converted into one of these kinds at the
//! dispatcher boundary and rendered as a user-facing string. No fault is
//! allowed to terminate the process.

use thiserror::Error;

/// Typed failure produced while handling a single query.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// The classifier produced no mappable label. Terminal for the request.
    #[error("Could not understand your request. Please try rephrasing.")]
    IntentUnrecognized,

    /// One or more required parameters could not be extracted or parsed.
    /// Carries every missing name, not just the first.
    #[error("Missing or unparsable required parameters: {}.", .0.join(", "))]
    RequiredParametersMissing(Vec<String>),

    /// A math function rejected its arguments.
    #[error("Calculation error: {0}")]
    Domain(String),

    /// Normalized arguments do not match the target function's expected
    /// keyword set. Reported with the offending argument set for diagnosis.
    #[error("Parameter mismatch for {function}: extracted values were {args:?}")]
    ArgumentMismatch { function: String, args: Vec<String> },

    /// Any other unexpected failure during calculation.
    #[error("An unexpected error occurred: {0}")]
    Unknown(String),
}

impl DispatchError {
    /// Short machine-readable kind, used in API responses and metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::IntentUnrecognized => "intent_unrecognized",
            Self::RequiredParametersMissing(_) => "required_parameters_missing",
            Self::Domain(_) => "domain_error",
            Self::ArgumentMismatch { .. } => "argument_mismatch",
            Self::Unknown(_) => "unknown",
        }
    }
}
