//! The fixed set of financial calculation intents.
//!
//! Each intent carries a stable key (used in configuration and APIs) and a
//! human-readable label (the candidate label sent to the zero-shot
//! classifier). The set is closed: the dispatcher has one marshalling arm
//! per variant and the intent table declares exactly one entry per variant.

use serde::{Deserialize, Serialize};

/// One of the five recognized financial calculation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    /// Discount a future amount back to today.
    #[serde(rename = "calculate_present_value")]
    PresentValue,
    /// Grow a present amount forward at a per-period rate.
    #[serde(rename = "calculate_future_value")]
    FutureValue,
    /// Interest earned without compounding.
    #[serde(rename = "calculate_simple_interest")]
    SimpleInterest,
    /// Future value under periodic compounding.
    #[serde(rename = "calculate_compound_interest")]
    CompoundInterest,
    /// Fixed monthly payment on an amortizing loan.
    #[serde(rename = "calculate_monthly_loan_payment")]
    MonthlyLoanPayment,
}

impl IntentKind {
    /// All intents, in classifier candidate order.
    pub const ALL: [IntentKind; 5] = [
        IntentKind::PresentValue,
        IntentKind::FutureValue,
        IntentKind::SimpleInterest,
        IntentKind::CompoundInterest,
        IntentKind::MonthlyLoanPayment,
    ];

    /// Stable configuration/API key.
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::PresentValue => "calculate_present_value",
            Self::FutureValue => "calculate_future_value",
            Self::SimpleInterest => "calculate_simple_interest",
            Self::CompoundInterest => "calculate_compound_interest",
            Self::MonthlyLoanPayment => "calculate_monthly_loan_payment",
        }
    }

    /// Candidate label presented to the zero-shot classifier.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PresentValue => "Calculate Present Value",
            Self::FutureValue => "Calculate Future Value",
            Self::SimpleInterest => "Calculate Simple Interest",
            Self::CompoundInterest => "Calculate Compound Interest",
            Self::MonthlyLoanPayment => "Calculate Monthly Loan Payment",
        }
    }

    /// Look up an intent by its stable key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|i| i.as_key() == key)
    }

    /// Look up an intent by its classifier label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|i| i.label() == label)
    }
}

impl std::fmt::Display for IntentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_key())
    }
}
