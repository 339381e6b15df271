//! Shared data types for face matching.

use serde::{Deserialize, Serialize};

use crate::defaults::SIMILARITY_THRESHOLD;
use crate::file_safety::label_stem;

/// A single face match returned by the comparison capability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FaceMatch {
    /// Similarity score in [0, 100].
    pub similarity: f64,
    /// Detection confidence for the matched face, when the service reports one.
    pub confidence: Option<f64>,
}

/// Outcome of scanning the gallery for a query image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchOutcome {
    /// Label (filename) of the best candidate, if any cleared the threshold.
    pub label: Option<String>,
    /// Best similarity score seen; 0.0 when no candidate matched.
    pub score: f64,
}

impl MatchOutcome {
    /// The "nothing matched" outcome.
    pub fn none() -> Self {
        Self {
            label: None,
            score: 0.0,
        }
    }

    pub fn is_match(&self) -> bool {
        self.label.is_some()
    }
}

/// Person details derived from the matched photo filename.
///
/// The gallery carries no metadata beyond the filename, so age and date of
/// birth are the literal string "Unknown".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchDetails {
    pub name: String,
    pub age: String,
    pub dob: String,
}

/// Result view data for a completed match request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchReport {
    /// Stored filename of the uploaded sketch.
    pub sketch_path: String,
    /// Filename of the best-matching gallery photo.
    pub photo_path: String,
    /// Similarity score rounded to 2 decimals.
    pub similarity: f64,
    pub details: MatchDetails,
    pub interpretation: String,
}

impl MatchReport {
    /// Build a report from a successful match outcome.
    pub fn new(sketch_path: impl Into<String>, photo_path: impl Into<String>, score: f64) -> Self {
        let photo_path = photo_path.into();
        let name = label_stem(&photo_path).to_string();
        Self {
            sketch_path: sketch_path.into(),
            photo_path,
            similarity: (score * 100.0).round() / 100.0,
            details: MatchDetails {
                name,
                age: "Unknown".to_string(),
                dob: "Unknown".to_string(),
            },
            interpretation: interpretation(score).to_string(),
        }
    }
}

/// Textual interpretation of a similarity score.
pub fn interpretation(score: f64) -> &'static str {
    if score > SIMILARITY_THRESHOLD as f64 {
        "Match found"
    } else {
        "Low similarity"
    }
}
