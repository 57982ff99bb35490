//! HTTP zero-shot classification backend.
//!
//! Sends the query text and candidate labels to a sidecar service wrapping
//! a pretrained zero-shot model and returns the ranked (label, score) list.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use finquery_core::{BackendError, LabelScore, ZeroShotBackend};

use crate::NluError;

/// HTTP zero-shot backend configuration
#[derive(Debug, Clone)]
pub struct ZeroShotHttpConfig {
    /// Base URL of the classification sidecar
    pub url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for ZeroShotHttpConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8091".to_string(),
            timeout_ms: 30000,
        }
    }
}

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
    labels: &'a [String],
}

/// Sidecar response, mirroring the transformers zero-shot pipeline output:
/// labels sorted by descending score, scores aligned by index.
#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    labels: Vec<String>,
    scores: Vec<f32>,
}

/// Zero-shot classification over an HTTP sidecar.
pub struct HttpZeroShotBackend {
    config: ZeroShotHttpConfig,
    client: reqwest::Client,
}

impl HttpZeroShotBackend {
    pub fn new(config: ZeroShotHttpConfig) -> Result<Self, NluError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| NluError::Configuration(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    pub fn new_with_url(url: impl Into<String>, timeout_ms: u64) -> Result<Self, NluError> {
        Self::new(ZeroShotHttpConfig {
            url: url.into(),
            timeout_ms,
        })
    }
}

#[async_trait]
impl ZeroShotBackend for HttpZeroShotBackend {
    async fn classify(
        &self,
        text: &str,
        labels: &[String],
    ) -> Result<Vec<LabelScore>, BackendError> {
        let url = format!("{}/classify", self.config.url);
        let response = self
            .client
            .post(&url)
            .json(&ClassifyRequest { text, labels })
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
                "classification sidecar returned {}",
                response.status()
            )));
        }

        let body: ClassifyResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        if body.labels.is_empty() || body.labels.len() != body.scores.len() {
            return Err(BackendError::InvalidResponse(format!(
                "mismatched labels/scores lengths: {} vs {}",
                body.labels.len(),
                body.scores.len()
            )));
        }

        Ok(body
            .labels
            .into_iter()
            .zip(body.scores)
            .map(|(label, score)| LabelScore { label, score })
            .collect())
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/health", self.config.url);
        matches!(self.client.get(&url).send().await, Ok(resp) if resp.status().is_success())
    }
}
