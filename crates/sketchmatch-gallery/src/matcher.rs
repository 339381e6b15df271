//! Best-match selection over the comparison backend.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, trace, warn};

use sketchmatch_compare::CompareBackend;
use sketchmatch_core::{defaults, MatchOutcome, Result};

use crate::scan::scan_gallery;

/// Finds the best-matching gallery photo for a query image.
///
/// Holds the comparison backend and threshold explicitly so tests can
/// substitute a scripted backend; there is no process-wide state.
#[derive(Clone)]
pub struct Matcher {
    backend: Arc<dyn CompareBackend>,
    similarity_threshold: f32,
}

impl Matcher {
    pub fn new(backend: Arc<dyn CompareBackend>) -> Self {
        Self {
            backend,
            similarity_threshold: defaults::SIMILARITY_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, similarity_threshold: f32) -> Self {
        self.similarity_threshold = similarity_threshold;
        self
    }

    pub fn similarity_threshold(&self) -> f32 {
        self.similarity_threshold
    }

    /// Compare the query against each candidate and return the best match.
    ///
    /// Candidates are visited in input order, one comparison call at a time.
    /// For each candidate the first returned face match counts; a candidate
    /// with no matches scores 0 and is skipped. The running best is replaced
    /// only on a strictly greater score, so the earliest candidate wins
    /// ties. A failed comparison call is logged and the scan continues —
    /// one bad candidate never aborts the scan.
    pub async fn find_best_match(
        &self,
        query: &[u8],
        candidates: &[(String, Vec<u8>)],
    ) -> MatchOutcome {
        let started = Instant::now();
        let mut best = MatchOutcome::none();

        for (label, bytes) in candidates {
            let matches = match self
                .backend
                .compare_faces(query, bytes, self.similarity_threshold)
                .await
            {
                Ok(matches) => matches,
                Err(e) => {
                    warn!(
                        candidate = %label,
                        error = %e,
                        "Comparison failed for candidate, skipping"
                    );
                    continue;
                }
            };

            let Some(first) = matches.first() else {
                trace!(candidate = %label, "No face match for candidate");
                continue;
            };

            trace!(candidate = %label, similarity = first.similarity, "Candidate scored");
            if first.similarity > best.score {
                best = MatchOutcome {
                    label: Some(label.clone()),
                    score: first.similarity,
                };
            }
        }

        info!(
            candidate_count = candidates.len(),
            success = best.is_match(),
            similarity = best.score,
            duration_ms = started.elapsed().as_millis() as u64,
            "Best-match scan complete"
        );
        best
    }

    /// Scan a gallery directory and find the best match for the query.
    ///
    /// A candidate whose bytes cannot be read is skipped under the same
    /// recovery policy as a failed comparison call.
    pub async fn find_best_match_in_dir(&self, query: &[u8], dir: &Path) -> Result<MatchOutcome> {
        let candidates = scan_gallery(dir)?;
        debug!(
            candidate_count = candidates.len(),
            dir = %dir.display(),
            "Matching query against gallery"
        );

        let mut loaded = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match candidate.read_bytes() {
                Ok(bytes) => loaded.push((candidate.label, bytes)),
                Err(e) => {
                    warn!(
                        candidate = %candidate.label,
                        error = %e,
                        "Failed to read candidate photo, skipping"
                    );
                }
            }
        }

        Ok(self.find_best_match(query, &loaded).await)
    }
}
