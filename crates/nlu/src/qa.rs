//! HTTP extractive question-answering backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use finquery_core::{BackendError, ExtractiveQaBackend, QaAnswer};

use crate::NluError;

/// HTTP QA backend configuration
#[derive(Debug, Clone)]
pub struct QaHttpConfig {
    /// Base URL of the question-answering sidecar
    pub url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for QaHttpConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8092".to_string(),
            timeout_ms: 30000,
        }
    }
}

#[derive(Debug, Serialize)]
struct AnswerRequest<'a> {
    question: &'a str,
    context: &'a str,
}

/// Sidecar response, mirroring the transformers QA pipeline output.
/// Span offsets are returned by the sidecar but unused here.
#[derive(Debug, Deserialize)]
struct AnswerResponse {
    answer: String,
    score: f32,
}

/// Extractive question answering over an HTTP sidecar.
pub struct HttpQaBackend {
    config: QaHttpConfig,
    client: reqwest::Client,
}

impl HttpQaBackend {
    pub fn new(config: QaHttpConfig) -> Result<Self, NluError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| NluError::Configuration(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    pub fn new_with_url(url: impl Into<String>, timeout_ms: u64) -> Result<Self, NluError> {
        Self::new(QaHttpConfig {
            url: url.into(),
            timeout_ms,
        })
    }
}

#[async_trait]
impl ExtractiveQaBackend for HttpQaBackend {
    async fn answer(&self, question: &str, context: &str) -> Result<QaAnswer, BackendError> {
        let url = format!("{}/answer", self.config.url);
        let response = self
            .client
            .post(&url)
            .json(&AnswerRequest { question, context })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Timeout
                } else {
                    BackendError::Request(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(BackendError::Request(format!(
                "QA sidecar returned {}",
                response.status()
            )));
        }

        let body: AnswerResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        Ok(QaAnswer {
            answer: body.answer,
            score: body.score,
        })
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/health", self.config.url);
        matches!(self.client.get(&url).send().await, Ok(resp) if resp.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = QaHttpConfig::default();
        assert_eq!(config.url, "http://127.0.0.1:8092");
        assert_eq!(config.timeout_ms, 30000);
    }

    #[test]
    fn test_new_with_default_config() {
        let backend = HttpQaBackend::new(QaHttpConfig::default());
        assert!(backend.is_ok());
    }

    #[test]
    fn test_response_ignores_span_offsets() {
        let json = r#"{"answer": "$1000", "score": 0.82, "start": 28, "end": 33}"#;
        let resp: AnswerResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.answer, "$1000");
        assert!((resp.score - 0.82).abs() < f32::EPSILON);
    }
}
