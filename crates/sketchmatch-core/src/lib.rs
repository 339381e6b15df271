//! # sketchmatch-core
//!
//! Core types, errors, and defaults for the sketchmatch service.
//!
//! This crate provides the foundational data structures and error taxonomy
//! that the other sketchmatch crates depend on.

pub mod defaults;
pub mod error;
pub mod file_safety;
pub mod logging;
pub mod models;

// Re-export commonly used types at crate root
pub use error::{CompareError, CompareResult, Error, Result};
pub use file_safety::{allowed_image_extension, label_stem, sanitize_filename};
pub use models::{interpretation, FaceMatch, MatchDetails, MatchOutcome, MatchReport};
