//! Face comparison backend trait.

use async_trait::async_trait;
use sketchmatch_core::{CompareResult, FaceMatch, Result};

/// Backend for pairwise face comparison.
///
/// Implementations compare the face(s) in a source image against a target
/// image and return every match whose similarity is at or above the passed
/// threshold. An empty vector means the images share no face above the
/// threshold — that is a normal answer, not an error.
#[async_trait]
pub trait CompareBackend: Send + Sync {
    /// Compare the faces in `source` against `target`.
    ///
    /// `similarity_threshold` is in [0, 100]; matches below it are never
    /// returned. Returned matches are ordered by the service (first match
    /// first), and similarity values are in [0, 100].
    async fn compare_faces(
        &self,
        source: &[u8],
        target: &[u8],
        similarity_threshold: f32,
    ) -> CompareResult<Vec<FaceMatch>>;

    /// Check if the comparison backend is reachable.
    async fn health_check(&self) -> Result<bool>;

    /// Human-readable name of the backing service.
    fn service_name(&self) -> &str;
}
