//! Rekognition-compatible face comparison backend.
//!
//! Speaks the `CompareFaces` JSON wire format (`x-amz-json-1.1` with an
//! `X-Amz-Target` header) to a configurable endpoint — a signing proxy, a
//! LocalStack instance, or anything else that honors the same contract.

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::debug;

use sketchmatch_core::{defaults, CompareError, CompareResult, FaceMatch, Result};

use crate::backend::CompareBackend;

const TARGET_HEADER: &str = "RekognitionService.CompareFaces";
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// HTTP backend for a Rekognition-compatible CompareFaces endpoint.
pub struct RekognitionBackend {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl RekognitionBackend {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: reqwest::Client::new(),
            timeout_secs: defaults::COMPARE_TIMEOUT_SECS,
        }
    }

    /// Create from environment variables.
    /// Returns None if COMPARE_BASE_URL is not set.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var(defaults::ENV_COMPARE_BASE_URL).ok()?;
        if base_url.is_empty() {
            return None;
        }
        let api_key = std::env::var(defaults::ENV_COMPARE_API_KEY)
            .ok()
            .filter(|k| !k.is_empty());
        let mut backend = Self::new(base_url, api_key);
        if let Some(timeout) = std::env::var(defaults::ENV_COMPARE_TIMEOUT_SECS)
            .ok()
            .and_then(|v| v.parse().ok())
        {
            backend.timeout_secs = timeout;
        }
        Some(backend)
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct CompareFacesRequest {
    source_image: ImagePayload,
    target_image: ImagePayload,
    similarity_threshold: f32,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ImagePayload {
    /// Base64-encoded image bytes.
    bytes: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CompareFacesResponse {
    #[serde(default)]
    face_matches: Vec<WireFaceMatch>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireFaceMatch {
    similarity: f64,
    #[serde(default)]
    face: Option<WireFace>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireFace {
    #[serde(default)]
    confidence: Option<f64>,
}

/// Error body shape used by x-amz-json-1.1 services.
#[derive(Deserialize)]
struct WireError {
    #[serde(rename = "__type", default)]
    error_type: Option<String>,
    #[serde(alias = "Message", default)]
    message: Option<String>,
}

#[async_trait]
impl CompareBackend for RekognitionBackend {
    async fn compare_faces(
        &self,
        source: &[u8],
        target: &[u8],
        similarity_threshold: f32,
    ) -> CompareResult<Vec<FaceMatch>> {
        let engine = base64::engine::general_purpose::STANDARD;
        let request = CompareFacesRequest {
            source_image: ImagePayload {
                bytes: engine.encode(source),
            },
            target_image: ImagePayload {
                bytes: engine.encode(target),
            },
            similarity_threshold,
        };

        let mut req = self
            .client
            .post(&self.base_url)
            .header("Content-Type", CONTENT_TYPE)
            .header("X-Amz-Target", TARGET_HEADER)
            .json(&request)
            .timeout(std::time::Duration::from_secs(self.timeout_secs));
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req
            .send()
            .await
            .map_err(|e| CompareError::Request(format!("CompareFaces request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            // Rekognition reports "no face in image" as InvalidParameterException
            if let Ok(err) = serde_json::from_str::<WireError>(&body) {
                if err
                    .error_type
                    .as_deref()
                    .is_some_and(|t| t.ends_with("InvalidParameterException"))
                {
                    return Err(CompareError::NoFaceDetected(
                        err.message.unwrap_or_else(|| "no face in image".to_string()),
                    ));
                }
            }
            return Err(CompareError::Service(format!(
                "CompareFaces returned {}: {}",
                status, body
            )));
        }

        let result: CompareFacesResponse = response.json().await.map_err(|e| {
            CompareError::Service(format!("Failed to parse CompareFaces response: {}", e))
        })?;

        debug!(
            match_count = result.face_matches.len(),
            similarity_threshold, "CompareFaces call complete"
        );
        Ok(result
            .face_matches
            .into_iter()
            .map(|m| FaceMatch {
                similarity: m.similarity,
                confidence: m.face.and_then(|f| f.confidence),
            })
            .collect())
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        match self
            .client
            .get(&url)
            .timeout(std::time::Duration::from_secs(5))
            .send()
            .await
        {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn service_name(&self) -> &str {
        "rekognition"
    }
}
