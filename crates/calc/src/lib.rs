//! Closed-form financial math and unit normalization
//!
//! Five pure, stateless functions plus the static key rewrite that turns
//! extracted entities (percent rates, month counts, compounding labels)
//! into the argument conventions the formulas expect. No rounding happens
//! here; presentation formatting is the caller's concern.

pub mod formulas;
pub mod normalize;

pub use formulas::{
    compound_interest, future_value, loan_amortization_payment, present_value, simple_interest,
};
pub use normalize::normalize_args;

use thiserror::Error;

/// Calculation errors
#[derive(Error, Debug, Clone)]
pub enum CalcError {
    /// A function rejected its arguments (zero compounding periods,
    /// negative rate, zero-or-fewer loan months).
    #[error("{0}")]
    Domain(String),
}
