//! Structured logging schema and field name constants for sketchmatch.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue (skipped candidate, fallback applied) |
//! | INFO  | Lifecycle events (startup, shutdown), match completions |
//! | DEBUG | Decision points, intermediate scores, config choices |
//! | TRACE | Per-candidate iteration detail |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated across a request and its comparison calls.
/// Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "gallery", "compare"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "matcher", "scan", "rekognition"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "find_best_match", "compare_faces", "scan_gallery"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Label of the candidate photo being compared.
pub const CANDIDATE: &str = "candidate";

/// Filename of the uploaded sketch.
pub const SKETCH: &str = "sketch";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Similarity score (0-100) returned for a comparison.
pub const SIMILARITY: &str = "similarity";

/// Number of candidates in the gallery scan.
pub const CANDIDATE_COUNT: &str = "candidate_count";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
