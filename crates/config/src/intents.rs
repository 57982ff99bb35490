//! Intent Configuration
//!
//! Static mapping from each intent to the questions used to extract its
//! parameters, the required-parameter set, and the target calculator
//! function. Ships with built-in definitions; a YAML file may override
//! them (same shape as the built-ins).

use serde::{Deserialize, Serialize};
use std::path::Path;

use finquery_core::IntentKind;

use crate::ConfigError;

/// Calculator function identifiers, one per closed-form formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalcFunction {
    PresentValue,
    FutureValue,
    SimpleInterest,
    CompoundInterest,
    LoanAmortizationPayment,
}

impl CalcFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PresentValue => "present_value",
            Self::FutureValue => "future_value",
            Self::SimpleInterest => "simple_interest",
            Self::CompoundInterest => "compound_interest",
            Self::LoanAmortizationPayment => "loan_amortization_payment",
        }
    }
}

/// One extractable parameter and the question that extracts it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Parameter name, e.g. "rate_percent"
    pub name: String,
    /// Question posed to the QA model against the user's query
    pub question: String,
}

/// Single intent definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentDefinition {
    /// Which intent this entry configures
    pub intent: IntentKind,
    /// Ordered parameter/question pairs
    pub parameters: Vec<ParameterSpec>,
    /// Parameter names that must be extracted for the calculation to run
    #[serde(default)]
    pub required: Vec<String>,
    /// Target calculator function
    pub function: CalcFunction,
}

impl IntentDefinition {
    /// Whether `name` is in the required-parameter set.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

/// Intent table: one definition per intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentsConfig {
    pub intents: Vec<IntentDefinition>,
    /// Minimum classifier confidence to commit an intent.
    /// 0.0 disables thresholding (the reference behavior).
    #[serde(default)]
    pub min_confidence: f32,
}

impl Default for IntentsConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

fn param(name: &str, question: &str) -> ParameterSpec {
    ParameterSpec {
        name: name.to_string(),
        question: question.to_string(),
    }
}

impl IntentsConfig {
    /// The built-in table covering all five intents.
    pub fn builtin() -> Self {
        let intents = vec![
            IntentDefinition {
                intent: IntentKind::PresentValue,
                parameters: vec![
                    param("future_value", "What is the future value or final amount?"),
                    param("rate_percent", "What is the interest rate in percent?"),
                    param("periods", "How many periods (e.g., years)?"),
                ],
                required: vec![
                    "future_value".to_string(),
                    "rate_percent".to_string(),
                    "periods".to_string(),
                ],
                function: CalcFunction::PresentValue,
            },
            IntentDefinition {
                intent: IntentKind::FutureValue,
                parameters: vec![
                    param(
                        "present_value",
                        "What is the present value or initial investment amount?",
                    ),
                    param("rate_percent", "What is the interest rate in percent?"),
                    param("periods", "How many periods (e.g., years)?"),
                ],
                required: vec![
                    "present_value".to_string(),
                    "rate_percent".to_string(),
                    "periods".to_string(),
                ],
                function: CalcFunction::FutureValue,
            },
            IntentDefinition {
                intent: IntentKind::SimpleInterest,
                parameters: vec![
                    param("principal", "What is the starting sum of money or principal?"),
                    param("rate_percent", "What specific percentage is the interest rate?"),
                    param("time_years", "For how many years is the interest calculated?"),
                ],
                required: vec![
                    "principal".to_string(),
                    "rate_percent".to_string(),
                    "time_years".to_string(),
                ],
                function: CalcFunction::SimpleInterest,
            },
            IntentDefinition {
                intent: IntentKind::CompoundInterest,
                parameters: vec![
                    param("principal", "What is the principal amount?"),
                    param(
                        "annual_rate_percent",
                        "What is the annual interest rate in percent?",
                    ),
                    param(
                        "compounding_frequency",
                        "How many times is the interest compounded per year?",
                    ),
                    param("years", "For how many years is the investment?"),
                ],
                required: vec![
                    "principal".to_string(),
                    "annual_rate_percent".to_string(),
                    "compounding_frequency".to_string(),
                    "years".to_string(),
                ],
                function: CalcFunction::CompoundInterest,
            },
            IntentDefinition {
                intent: IntentKind::MonthlyLoanPayment,
                parameters: vec![
                    param(
                        "principal",
                        "What is the loan principal amount or total borrowed?",
                    ),
                    param(
                        "annual_rate_percent",
                        "What is the annual interest rate in percent?",
                    ),
                    param("term_months", "For how many months does the loan last?"),
                ],
                required: vec![
                    "principal".to_string(),
                    "annual_rate_percent".to_string(),
                    "term_months".to_string(),
                ],
                function: CalcFunction::LoanAmortizationPayment,
            },
        ];

        Self {
            intents,
            min_confidence: 0.0,
        }
    }

    /// Load an override table from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileNotFound(format!("{}: {e}", path.as_ref().display())))?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Get the definition for an intent.
    pub fn get(&self, intent: IntentKind) -> Option<&IntentDefinition> {
        self.intents.iter().find(|i| i.intent == intent)
    }

    /// Candidate labels in table order, for the zero-shot classifier.
    pub fn candidate_labels(&self) -> Vec<String> {
        self.intents
            .iter()
            .map(|i| i.intent.label().to_string())
            .collect()
    }

    /// Structural checks: one entry per intent, required names declared as
    /// parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for intent in IntentKind::ALL {
            let matching = self.intents.iter().filter(|i| i.intent == intent).count();
            if matching != 1 {
                return Err(ConfigError::InvalidValue {
                    field: "intents".to_string(),
                    message: format!("expected exactly one entry for {intent}, found {matching}"),
                });
            }
        }
        for def in &self.intents {
            for required in &def.required {
                if !def.parameters.iter().any(|p| &p.name == required) {
                    return Err(ConfigError::InvalidValue {
                        field: format!("intents.{}", def.intent),
                        message: format!("required parameter '{required}' has no question"),
                    });
                }
            }
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ConfigError::InvalidValue {
                field: "min_confidence".to_string(),
                message: "must be within [0, 1]".to_string(),
            });
        }
        Ok(())
    }
}
