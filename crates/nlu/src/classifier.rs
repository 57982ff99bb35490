//! Intent classification over the zero-shot backend.

use std::sync::Arc;

use finquery_core::{IntentKind, ZeroShotBackend};
use finquery_config::IntentsConfig;

/// Maps free text to one of the fixed intents with a confidence score.
///
/// All backend faults are absorbed here: the caller always receives
/// `(None, 0.0)` rather than an error when classification cannot commit.
pub struct IntentClassifier {
    backend: Arc<dyn ZeroShotBackend>,
    labels: Vec<String>,
    min_confidence: f32,
}

impl IntentClassifier {
    pub fn new(backend: Arc<dyn ZeroShotBackend>, intents: &IntentsConfig) -> Self {
        Self {
            backend,
            labels: intents.candidate_labels(),
            min_confidence: intents.min_confidence,
        }
    }

    /// Identify the intent of a query.
    ///
    /// Returns the top-scoring mappable label, or `(None, 0.0)` when the
    /// backend faults, the label set is unmapped, or (with a non-zero
    /// threshold configured) confidence falls below `min_confidence`.
    pub async fn classify(&self, query: &str) -> (Option<IntentKind>, f32) {
        let ranked = match self.backend.classify(query, &self.labels).await {
            Ok(ranked) => ranked,
            Err(e) => {
                tracing::warn!(error = %e, "intent classification failed");
                return (None, 0.0);
            }
        };

        let Some(top) = ranked.first() else {
            return (None, 0.0);
        };

        let Some(intent) = IntentKind::from_label(&top.label) else {
            tracing::warn!(label = %top.label, "classifier returned unmapped label");
            return (None, 0.0);
        };

        if self.min_confidence > 0.0 && top.score < self.min_confidence {
            tracing::info!(
                intent = %intent,
                score = top.score,
                threshold = self.min_confidence,
                "classification below confidence threshold"
            );
            return (None, top.score);
        }

        (Some(intent), top.score)
    }

    /// Whether the underlying backend is reachable.
    pub async fn is_available(&self) -> bool {
        self.backend.is_available().await
    }
}
