//! Centralized default constants for the sketchmatch service.
//!
//! **This module is the single source of truth** for all shared default
//! values. Other crates reference these constants instead of defining
//! their own magic numbers.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section and document the rationale for the chosen value.

// =============================================================================
// MATCHING
// =============================================================================

/// Minimum similarity score (0-100) for a comparison to count as a match.
///
/// Passed to the comparison service, which only returns face matches at or
/// above this value. A candidate that clears it can therefore always beat
/// the initial best score of 0.
pub const SIMILARITY_THRESHOLD: f32 = 50.0;

/// File extensions accepted for both uploaded sketches and gallery photos.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

// =============================================================================
// STORAGE LAYOUT
// =============================================================================

/// Default directory of candidate reference photos (flat, filenames are labels).
pub const PHOTO_DIR: &str = "static/photos";

/// Default directory where uploaded sketches are persisted.
pub const UPLOAD_DIR: &str = "static/uploads";

// =============================================================================
// HTTP SERVER
// =============================================================================

/// Default bind host.
pub const HOST: &str = "0.0.0.0";

/// Default bind port.
pub const PORT: u16 = 5000;

/// Default maximum accepted upload size in bytes (8 MiB).
pub const MAX_UPLOAD_BYTES: usize = 8 * 1024 * 1024;

// =============================================================================
// COMPARISON BACKEND
// =============================================================================

/// Default per-call timeout for comparison requests, in seconds.
pub const COMPARE_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// ENVIRONMENT VARIABLE NAMES
// =============================================================================

/// Base URL of the Rekognition-compatible comparison endpoint.
pub const ENV_COMPARE_BASE_URL: &str = "COMPARE_BASE_URL";

/// Optional bearer token for the comparison endpoint.
pub const ENV_COMPARE_API_KEY: &str = "COMPARE_API_KEY";

/// Override for the per-call comparison timeout (seconds).
pub const ENV_COMPARE_TIMEOUT_SECS: &str = "COMPARE_TIMEOUT_SECS";

/// Override for the candidate photo directory.
pub const ENV_PHOTO_DIR: &str = "PHOTO_DIR";

/// Override for the sketch upload directory.
pub const ENV_UPLOAD_DIR: &str = "UPLOAD_DIR";

/// Override for the bind host.
pub const ENV_HOST: &str = "HOST";

/// Override for the bind port.
pub const ENV_PORT: &str = "PORT";

/// Override for the maximum upload size in bytes.
pub const ENV_MAX_UPLOAD_BYTES: &str = "MAX_UPLOAD_BYTES";
