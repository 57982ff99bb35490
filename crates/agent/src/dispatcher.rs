//! The dispatcher: one query, start to finish.

use std::fmt::Write as _;
use std::sync::Arc;

use finquery_calc::{
    compound_interest, future_value, loan_amortization_payment, normalize_args, present_value,
    simple_interest, CalcError,
};
use finquery_config::{IntentDefinition, IntentsConfig};
use finquery_core::{
    CalculationArgs, CalculationResult, DispatchError, IntentKind, QueryReport,
};
use finquery_nlu::{EntityExtractor, IntentClassifier};

use crate::format::format_usd;

/// Orchestrates classify -> extract -> normalize -> calculate -> format.
///
/// Stateless across requests: the only shared data is the immutable intent
/// table and the (read-only) inference backends behind the classifier and
/// extractor.
pub struct Dispatcher {
    classifier: IntentClassifier,
    extractor: EntityExtractor,
    intents: Arc<IntentsConfig>,
}

impl Dispatcher {
    pub fn new(
        classifier: IntentClassifier,
        extractor: EntityExtractor,
        intents: Arc<IntentsConfig>,
    ) -> Self {
        Self {
            classifier,
            extractor,
            intents,
        }
    }

    /// Handle one raw query string.
    ///
    /// Any stage failure short-circuits the remaining stages; partial
    /// progress (interpreted intent, extracted values) stays on the report.
    pub async fn process(&self, query: &str) -> QueryReport {
        let mut report = QueryReport::new();

        let (intent, confidence) = self.classifier.classify(query).await;
        report.confidence = confidence;

        let Some(intent) = intent else {
            return self.fail(report, DispatchError::IntentUnrecognized);
        };
        report.intent = Some(intent);
        let _ = writeln!(report.details, "Interpreted Action: {}", intent.label());

        let Some(definition) = self.intents.get(intent) else {
            // Unreachable with a validated table; recovered all the same.
            return self.fail(
                report,
                DispatchError::Unknown(format!("no configuration for intent {intent}")),
            );
        };

        let outcome = self.extractor.extract(query, definition).await;
        report.extracted = outcome.entities.clone();
        let _ = writeln!(
            report.details,
            "Extracted Values: {}",
            render_map(&report.extracted)
        );

        if !outcome.is_complete() {
            return self.fail(
                report,
                DispatchError::RequiredParametersMissing(outcome.missing),
            );
        }

        let args = normalize_args(&outcome.entities);

        match invoke(intent, definition, &args) {
            Ok((value, call)) => {
                let _ = writeln!(report.details, "Calculation: {call}");
                let _ = write!(report.details, "Result: {value:.2}");
                report.result = Some(CalculationResult {
                    text: result_text(intent, value),
                    value,
                });
                tracing::info!(
                    request_id = %report.request_id,
                    intent = %intent,
                    confidence,
                    value,
                    "query calculated"
                );
                metrics::counter!("finquery_queries_total", "outcome" => "success").increment(1);
                report
            }
            Err(err) => self.fail(report, err),
        }
    }

    /// Whether both inference backends are reachable.
    pub async fn backends_available(&self) -> (bool, bool) {
        (
            self.classifier.is_available().await,
            self.extractor.is_available().await,
        )
    }

    fn fail(&self, mut report: QueryReport, err: DispatchError) -> QueryReport {
        tracing::info!(
            request_id = %report.request_id,
            kind = err.kind(),
            "query failed: {err}"
        );
        metrics::counter!("finquery_queries_total", "outcome" => err.kind()).increment(1);
        report.error = Some((&err).into());
        report
    }
}

/// Select and invoke the calculator function for `intent` with exactly the
/// normalized arguments it requires.
///
/// One explicit arm per intent; the parameter sets are fixed and small, so
/// there is no generic dispatch here. Returns the raw value plus the
/// `function(arg=value, ...)` trace line.
fn invoke(
    intent: IntentKind,
    definition: &IntentDefinition,
    args: &CalculationArgs,
) -> Result<(f64, String), DispatchError> {
    let want = |name: &str| -> Result<f64, DispatchError> {
        args.get(name)
            .copied()
            .ok_or_else(|| mismatch(definition, args))
    };

    let (value, call) = match intent {
        IntentKind::PresentValue => {
            let fv = want("future_value")?;
            let rate = want("rate")?;
            let n = want("periods")?;
            (
                present_value(fv, rate, n),
                format!("present_value(fv={fv:.4}, rate={rate:.4}, n_periods={n:.4})"),
            )
        }
        IntentKind::FutureValue => {
            let pv = want("present_value")?;
            let rate = want("rate")?;
            let n = want("periods")?;
            (
                future_value(pv, rate, n),
                format!("future_value(pv={pv:.4}, rate={rate:.4}, n_periods={n:.4})"),
            )
        }
        IntentKind::SimpleInterest => {
            let principal = want("principal")?;
            let rate = want("rate")?;
            let time = want("time")?;
            (
                simple_interest(principal, rate, time),
                format!("simple_interest(principal={principal:.4}, rate={rate:.4}, time={time:.4})"),
            )
        }
        IntentKind::CompoundInterest => {
            let principal = want("principal")?;
            let annual_rate = want("annual_rate")?;
            let m = want("times_compounded_per_year")?;
            let years = want("years")?;
            let value = compound_interest(principal, annual_rate, m, years)
                .map_err(|CalcError::Domain(msg)| DispatchError::Domain(msg))?;
            (
                value,
                format!(
                    "compound_interest(principal={principal:.4}, annual_rate={annual_rate:.4}, \
                     times_compounded_per_year={m:.4}, years={years:.4})"
                ),
            )
        }
        IntentKind::MonthlyLoanPayment => {
            let principal = want("principal")?;
            let annual_rate = want("annual_rate")?;
            let n_months = want("n_months")?;
            let value = loan_amortization_payment(principal, annual_rate, n_months)
                .map_err(|CalcError::Domain(msg)| DispatchError::Domain(msg))?;
            (
                value,
                format!(
                    "loan_amortization_payment(principal={principal:.4}, \
                     annual_rate={annual_rate:.4}, n_months={n_months:.4})"
                ),
            )
        }
    };

    if !value.is_finite() {
        return Err(DispatchError::Unknown(format!(
            "calculation produced a non-finite value ({value})"
        )));
    }

    Ok((value, call))
}

fn mismatch(definition: &IntentDefinition, args: &CalculationArgs) -> DispatchError {
    let mut got: Vec<String> = args.keys().cloned().collect();
    got.sort();
    DispatchError::ArgumentMismatch {
        function: definition.function.as_str().to_string(),
        args: got,
    }
}

fn result_text(intent: IntentKind, value: f64) -> String {
    let amount = format_usd(value);
    match intent {
        IntentKind::PresentValue => format!("The Present Value is: ${amount}"),
        IntentKind::FutureValue => format!("The Future Value is: ${amount}"),
        IntentKind::SimpleInterest => format!("The Simple Interest earned is: ${amount}"),
        IntentKind::CompoundInterest => {
            format!("The total amount with Compound Interest (Future Value) is: ${amount}")
        }
        IntentKind::MonthlyLoanPayment => format!("The Monthly Loan Payment is: ${amount}"),
    }
}

fn render_map(entities: &finquery_core::ExtractedEntities) -> String {
    let mut pairs: Vec<_> = entities.iter().collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));
    let body = pairs
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{body}}}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use finquery_core::{
        BackendError, ExtractiveQaBackend, LabelScore, QaAnswer, ZeroShotBackend,
    };
    use std::collections::HashMap;

    struct FakeZeroShot {
        top: Option<(String, f32)>,
    }

    #[async_trait]
    impl ZeroShotBackend for FakeZeroShot {
        async fn classify(
            &self,
            _text: &str,
            _labels: &[String],
        ) -> Result<Vec<LabelScore>, BackendError> {
            match &self.top {
                Some((label, score)) => Ok(vec![LabelScore {
                    label: label.clone(),
                    score: *score,
                }]),
                None => Err(BackendError::Request("down".to_string())),
            }
        }

        async fn is_available(&self) -> bool {
            true
        }
    }

    struct FakeQa {
        answers: HashMap<String, (String, f32)>,
    }

    #[async_trait]
    impl ExtractiveQaBackend for FakeQa {
        async fn answer(&self, question: &str, _context: &str) -> Result<QaAnswer, BackendError> {
            match self.answers.get(question) {
                Some((answer, score)) => Ok(QaAnswer {
                    answer: answer.clone(),
                    score: *score,
                }),
                None => Err(BackendError::Request("no scripted answer".to_string())),
            }
        }

        async fn is_available(&self) -> bool {
            true
        }
    }

    fn dispatcher(top: Option<(&str, f32)>, answers: &[(&str, &str, f32)]) -> Dispatcher {
        let intents = Arc::new(IntentsConfig::builtin());
        let classifier = IntentClassifier::new(
            Arc::new(FakeZeroShot {
                top: top.map(|(l, s)| (l.to_string(), s)),
            }),
            &intents,
        );
        let extractor = EntityExtractor::new(
            Arc::new(FakeQa {
                answers: answers
                    .iter()
                    .map(|(q, a, s)| (q.to_string(), (a.to_string(), *s)))
                    .collect(),
            }),
            0.1,
        );
        Dispatcher::new(classifier, extractor, intents)
    }

    #[tokio::test]
    async fn test_future_value_end_to_end() {
        let d = dispatcher(
            Some(("Calculate Future Value", 0.93)),
            &[
                (
                    "What is the present value or initial investment amount?",
                    "$1000",
                    0.9,
                ),
                ("What is the interest rate in percent?", "5%", 0.8),
                ("How many periods (e.g., years)?", "10 years", 0.7),
            ],
        );

        let report = d
            .process("What is the future value of $1000 at 5% for 10 years?")
            .await;

        assert!(report.is_success(), "report: {report:?}");
        assert_eq!(report.intent, Some(IntentKind::FutureValue));
        let result = report.result.as_ref().unwrap();
        assert!((result.value - 1628.894627).abs() < 1e-4);
        assert_eq!(result.text, "The Future Value is: $1,628.89");
        assert!(report.details.contains("Interpreted Action: Calculate Future Value"));
        assert!(report.details.contains("future_value(pv=1000.0000, rate=0.0500"));
    }

    #[tokio::test]
    async fn test_unrecognized_intent_short_circuits() {
        let d = dispatcher(None, &[]);
        let report = d.process("tell me a joke").await;

        assert!(!report.is_success());
        assert_eq!(report.intent, None);
        let error = report.error.as_ref().unwrap();
        assert_eq!(error.kind, "intent_unrecognized");
        assert!(report.extracted.is_empty());
    }

    #[tokio::test]
    async fn test_missing_parameters_reported_with_partial_progress() {
        // Simple interest with only the principal extractable.
        let d = dispatcher(
            Some(("Calculate Simple Interest", 0.85)),
            &[(
                "What is the starting sum of money or principal?",
                "$1000",
                0.9,
            )],
        );

        let report = d.process("simple interest on $1000").await;

        assert!(!report.is_success());
        assert_eq!(report.intent, Some(IntentKind::SimpleInterest));
        assert_eq!(report.extracted["principal"], 1000.0);
        let error = report.error.as_ref().unwrap();
        assert_eq!(error.kind, "required_parameters_missing");
        assert!(error.message.contains("rate_percent"));
        assert!(error.message.contains("time_years"));
    }

    #[tokio::test]
    async fn test_domain_error_surfaces() {
        let d = dispatcher(
            Some(("Calculate Compound Interest", 0.9)),
            &[
                ("What is the principal amount?", "$1000", 0.9),
                ("What is the annual interest rate in percent?", "5%", 0.9),
                (
                    "How many times is the interest compounded per year?",
                    "0",
                    0.9,
                ),
                ("For how many years is the investment?", "10", 0.9),
            ],
        );

        let report = d
            .process("compound interest on $1000 at 5% compounded 0 times a year for 10 years")
            .await;

        let error = report.error.as_ref().unwrap();
        assert_eq!(error.kind, "domain_error");
        assert!(error.message.contains("compounded per year"));
    }

    #[tokio::test]
    async fn test_loan_payment_zero_rate() {
        let d = dispatcher(
            Some(("Calculate Monthly Loan Payment", 0.88)),
            &[
                (
                    "What is the loan principal amount or total borrowed?",
                    "$12,000",
                    0.9,
                ),
                ("What is the annual interest rate in percent?", "0%", 0.9),
                ("For how many months does the loan last?", "24 months", 0.9),
            ],
        );

        let report = d.process("monthly payment on a $12,000 interest-free loan over 24 months").await;

        assert!(report.is_success(), "report: {report:?}");
        let result = report.result.as_ref().unwrap();
        assert!((result.value - 500.0).abs() < 1e-9);
        assert_eq!(result.text, "The Monthly Loan Payment is: $500.00");
    }

    #[tokio::test]
    async fn test_argument_mismatch_reports_offending_set() {
        // A table defect: the definition declares a parameter the
        // marshalling arm does not expect.
        let mut intents = IntentsConfig::builtin();
        let def = intents
            .intents
            .iter_mut()
            .find(|d| d.intent == IntentKind::FutureValue)
            .unwrap();
        def.parameters[0].name = "starting_balance".to_string();
        def.required[0] = "starting_balance".to_string();
        let intents = Arc::new(intents);

        let classifier = IntentClassifier::new(
            Arc::new(FakeZeroShot {
                top: Some(("Calculate Future Value".to_string(), 0.9)),
            }),
            &intents,
        );
        let extractor = EntityExtractor::new(
            Arc::new(FakeQa {
                answers: [
                    (
                        "What is the present value or initial investment amount?".to_string(),
                        ("$1000".to_string(), 0.9),
                    ),
                    (
                        "What is the interest rate in percent?".to_string(),
                        ("5%".to_string(), 0.9),
                    ),
                    (
                        "How many periods (e.g., years)?".to_string(),
                        ("10".to_string(), 0.9),
                    ),
                ]
                .into_iter()
                .collect(),
            }),
            0.1,
        );
        let d = Dispatcher::new(classifier, extractor, intents);

        let report = d.process("future value of $1000 at 5% for 10 years").await;

        let error = report.error.as_ref().unwrap();
        assert_eq!(error.kind, "argument_mismatch");
        assert!(error.message.contains("future_value"));
        assert!(error.message.contains("starting_balance"));
    }
}
