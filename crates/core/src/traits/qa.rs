//! Extractive question-answering backend trait.

use async_trait::async_trait;

use super::BackendError;

/// Answer span located within the context text.
#[derive(Debug, Clone, PartialEq)]
pub struct QaAnswer {
    /// The extracted span, verbatim from the context.
    pub answer: String,
    /// Confidence in [0, 1].
    pub score: f32,
}

/// Extractive question answering: locate an answer span within a given
/// context for a posed question.
#[async_trait]
pub trait ExtractiveQaBackend: Send + Sync {
    async fn answer(&self, question: &str, context: &str) -> Result<QaAnswer, BackendError>;

    /// Whether the backend is currently reachable.
    async fn is_available(&self) -> bool;
}
