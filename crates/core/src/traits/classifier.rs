//! Zero-shot classification backend trait.

use async_trait::async_trait;

use super::BackendError;

/// One candidate label with its score.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelScore {
    pub label: String,
    /// Confidence in [0, 1].
    pub score: f32,
}

/// Zero-shot text classifier over a caller-supplied candidate label set.
#[async_trait]
pub trait ZeroShotBackend: Send + Sync {
    /// Score `text` against `labels`, highest score first.
    ///
    /// Implementations must return at least one entry on success.
    async fn classify(
        &self,
        text: &str,
        labels: &[String],
    ) -> Result<Vec<LabelScore>, BackendError>;

    /// Whether the backend is currently reachable.
    async fn is_available(&self) -> bool;
}
