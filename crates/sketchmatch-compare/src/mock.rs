//! Scripted comparison backend for deterministic testing.
//!
//! Behaviors are keyed on the target image bytes interpreted as UTF-8, so a
//! test can use short string "images" and script each candidate's outcome.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let backend = ScriptedCompareBackend::new()
//!     .with_match("alice-photo", 72.0)
//!     .with_no_match("bob-photo");
//!
//! let matches = backend
//!     .compare_faces(b"sketch", b"alice-photo", 50.0)
//!     .await
//!     .unwrap();
//! assert_eq!(matches[0].similarity, 72.0);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sketchmatch_core::{CompareError, CompareResult, FaceMatch, Result};

use crate::backend::CompareBackend;

/// What a scripted comparison should do for a given target.
#[derive(Debug, Clone)]
enum Behavior {
    Matches(Vec<FaceMatch>),
    NoMatch,
    Error(CompareError),
}

/// One recorded call, for assertions.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub target_key: String,
    pub similarity_threshold: f32,
}

/// Mock comparison backend with scripted per-target behavior.
#[derive(Clone)]
pub struct ScriptedCompareBackend {
    behaviors: Arc<HashMap<String, Behavior>>,
    call_log: Arc<Mutex<Vec<RecordedCall>>>,
    healthy: bool,
}

impl Default for ScriptedCompareBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedCompareBackend {
    /// Create a mock where every unscripted target yields no match.
    pub fn new() -> Self {
        Self {
            behaviors: Arc::new(HashMap::new()),
            call_log: Arc::new(Mutex::new(Vec::new())),
            healthy: true,
        }
    }

    /// Script a single face match with the given similarity for a target.
    pub fn with_match(self, target_key: impl Into<String>, similarity: f64) -> Self {
        self.with_matches(
            target_key,
            vec![FaceMatch {
                similarity,
                confidence: Some(99.0),
            }],
        )
    }

    /// Script multiple face matches for a target (the matcher must take the first).
    pub fn with_matches(mut self, target_key: impl Into<String>, matches: Vec<FaceMatch>) -> Self {
        Arc::make_mut(&mut self.behaviors).insert(target_key.into(), Behavior::Matches(matches));
        self
    }

    /// Script an explicit no-match answer for a target.
    pub fn with_no_match(mut self, target_key: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.behaviors).insert(target_key.into(), Behavior::NoMatch);
        self
    }

    /// Script a comparison failure for a target.
    pub fn with_error(mut self, target_key: impl Into<String>, error: CompareError) -> Self {
        Arc::make_mut(&mut self.behaviors).insert(target_key.into(), Behavior::Error(error));
        self
    }

    /// Mark the backend as unhealthy for health-check tests.
    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Number of comparison calls made.
    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }
}

#[async_trait]
impl CompareBackend for ScriptedCompareBackend {
    async fn compare_faces(
        &self,
        _source: &[u8],
        target: &[u8],
        similarity_threshold: f32,
    ) -> CompareResult<Vec<FaceMatch>> {
        let target_key = String::from_utf8_lossy(target).to_string();
        self.call_log.lock().unwrap().push(RecordedCall {
            target_key: target_key.clone(),
            similarity_threshold,
        });

        match self.behaviors.get(&target_key) {
            Some(Behavior::Matches(matches)) => Ok(matches.clone()),
            Some(Behavior::NoMatch) | None => Ok(Vec::new()),
            Some(Behavior::Error(err)) => Err(err.clone()),
        }
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.healthy)
    }

    fn service_name(&self) -> &str {
        "scripted-mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_match() {
        let backend = ScriptedCompareBackend::new().with_match("alice.jpg", 72.0);
        let matches = backend
            .compare_faces(b"sketch", b"alice.jpg", 50.0)
            .await
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].similarity, 72.0);
    }

    #[tokio::test]
    async fn test_unscripted_target_yields_no_match() {
        let backend = ScriptedCompareBackend::new();
        let matches = backend
            .compare_faces(b"sketch", b"stranger.jpg", 50.0)
            .await
            .unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_scripted_error() {
        let backend = ScriptedCompareBackend::new()
            .with_error("broken.jpg", CompareError::Service("HTTP 500".to_string()));
        let err = backend
            .compare_faces(b"sketch", b"broken.jpg", 50.0)
            .await
            .unwrap_err();
        assert_eq!(err, CompareError::Service("HTTP 500".to_string()));
    }

    #[tokio::test]
    async fn test_call_log_records_threshold() {
        let backend = ScriptedCompareBackend::new();
        let _ = backend.compare_faces(b"s", b"a.jpg", 50.0).await;
        let _ = backend.compare_faces(b"s", b"b.jpg", 50.0).await;

        let calls = backend.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].target_key, "a.jpg");
        assert_eq!(calls[0].similarity_threshold, 50.0);
        assert_eq!(calls[1].target_key, "b.jpg");
    }

    #[tokio::test]
    async fn test_health_check() {
        assert!(ScriptedCompareBackend::new().health_check().await.unwrap());
        assert!(!ScriptedCompareBackend::new()
            .unhealthy()
            .health_check()
            .await
            .unwrap());
    }
}
