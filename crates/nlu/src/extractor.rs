//! Entity extraction via question answering.
//!
//! For a committed intent, each declared parameter is recovered by posing
//! its configured question against the user's query text and parsing a
//! number out of the answer span.

use std::sync::Arc;

use finquery_core::{ExtractedEntities, ExtractiveQaBackend};
use finquery_config::IntentDefinition;

use crate::numeric::parse_numeric;

/// Result of one extraction pass: whatever was extracted, plus the names
/// of required parameters that could not be recovered.
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    pub entities: ExtractedEntities,
    pub missing: Vec<String>,
}

impl ExtractionOutcome {
    /// All required parameters were extracted and parsed.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Extracts numeric parameters for an intent using the QA backend.
pub struct EntityExtractor {
    backend: Arc<dyn ExtractiveQaBackend>,
    /// Answers scoring at or below this are treated as absent.
    min_score: f32,
}

impl EntityExtractor {
    pub fn new(backend: Arc<dyn ExtractiveQaBackend>, min_score: f32) -> Self {
        Self { backend, min_score }
    }

    /// Run every parameter question for `definition` against `query`.
    ///
    /// A backend fault on one parameter is recovered locally (logged,
    /// treated as absent) and never aborts extraction of the rest. The
    /// outcome lists every missing required parameter, not just the first.
    pub async fn extract(&self, query: &str, definition: &IntentDefinition) -> ExtractionOutcome {
        let mut entities = ExtractedEntities::new();
        let mut missing = Vec::new();

        for parameter in &definition.parameters {
            let accepted = match self.backend.answer(&parameter.question, query).await {
                Ok(answer) if answer.score > self.min_score => {
                    match parse_numeric(&answer.answer) {
                        Some(value) => {
                            entities.insert(parameter.name.clone(), value);
                            true
                        }
                        None => {
                            tracing::debug!(
                                parameter = %parameter.name,
                                answer = %answer.answer,
                                "answer span contained no parsable number"
                            );
                            false
                        }
                    }
                }
                Ok(answer) => {
                    tracing::debug!(
                        parameter = %parameter.name,
                        score = answer.score,
                        threshold = self.min_score,
                        "answer rejected below score threshold"
                    );
                    false
                }
                Err(e) => {
                    tracing::warn!(
                        parameter = %parameter.name,
                        error = %e,
                        "QA backend fault; treating parameter as absent"
                    );
                    false
                }
            };

            if !accepted && definition.is_required(&parameter.name) {
                missing.push(parameter.name.clone());
            }
        }

        ExtractionOutcome { entities, missing }
    }

    /// Whether the underlying backend is reachable.
    pub async fn is_available(&self) -> bool {
        self.backend.is_available().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use finquery_core::{BackendError, IntentKind, QaAnswer};
    use finquery_config::IntentsConfig;
    use std::collections::HashMap;

    /// Scripted QA backend keyed by question text. Questions without an
    /// entry raise a fault, exercising per-parameter recovery.
    struct FakeQa {
        answers: HashMap<String, (String, f32)>,
    }

    impl FakeQa {
        fn new(entries: &[(&str, &str, f32)]) -> Self {
            Self {
                answers: entries
                    .iter()
                    .map(|(q, a, s)| (q.to_string(), (a.to_string(), *s)))
                    .collect(),
            }
        }
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

    fn definition(intent: IntentKind) -> IntentDefinition {
        IntentsConfig::builtin().get(intent).unwrap().clone()
    }

    #[tokio::test]
    async fn test_full_extraction() {
        let qa = FakeQa::new(&[
            (
                "What is the present value or initial investment amount?",
                "$1000",
                0.9,
            ),
            ("What is the interest rate in percent?", "5%", 0.8),
            ("How many periods (e.g., years)?", "10 years", 0.7),
        ]);
        let extractor = EntityExtractor::new(Arc::new(qa), 0.1);

        let outcome = extractor
            .extract(
                "What is the future value of $1000 at 5% for 10 years?",
                &definition(IntentKind::FutureValue),
            )
            .await;

        assert!(outcome.is_complete());
        assert_eq!(outcome.entities["present_value"], 1000.0);
        assert_eq!(outcome.entities["rate_percent"], 5.0);
        assert_eq!(outcome.entities["periods"], 10.0);
    }

    #[tokio::test]
    async fn test_missing_lists_every_required_parameter() {
        // Only principal answerable; rate and time questions fault.
        let qa = FakeQa::new(&[(
            "What is the starting sum of money or principal?",
            "$1000",
            0.9,
        )]);
        let extractor = EntityExtractor::new(Arc::new(qa), 0.1);

        let outcome = extractor
            .extract(
                "simple interest on $1000",
                &definition(IntentKind::SimpleInterest),
            )
            .await;

        assert!(!outcome.is_complete());
        assert_eq!(outcome.entities.len(), 1);
        assert_eq!(outcome.entities["principal"], 1000.0);
        assert_eq!(
            outcome.missing,
            vec!["rate_percent".to_string(), "time_years".to_string()]
        );
    }

    #[tokio::test]
    async fn test_low_score_answer_rejected() {
        let qa = FakeQa::new(&[
            (
                "What is the starting sum of money or principal?",
                "$1000",
                0.9,
            ),
            // At the threshold is not above it.
            ("What specific percentage is the interest rate?", "5%", 0.1),
            ("For how many years is the interest calculated?", "3 years", 0.5),
        ]);
        let extractor = EntityExtractor::new(Arc::new(qa), 0.1);

        let outcome = extractor
            .extract("interest on $1000 for 3 years", &definition(IntentKind::SimpleInterest))
            .await;

        assert_eq!(outcome.missing, vec!["rate_percent".to_string()]);
        assert_eq!(outcome.entities.len(), 2);
    }

    #[tokio::test]
    async fn test_unparsable_answer_counts_as_missing() {
        let qa = FakeQa::new(&[
            (
                "What is the starting sum of money or principal?",
                "a tidy sum",
                0.9,
            ),
            ("What specific percentage is the interest rate?", "5%", 0.9),
            ("For how many years is the interest calculated?", "3", 0.9),
        ]);
        let extractor = EntityExtractor::new(Arc::new(qa), 0.1);

        let outcome = extractor
            .extract("some query", &definition(IntentKind::SimpleInterest))
            .await;

        assert_eq!(outcome.missing, vec!["principal".to_string()]);
        assert_eq!(outcome.entities["rate_percent"], 5.0);
    }
}
