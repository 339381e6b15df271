//! Error types for sketchmatch.

use thiserror::Error;

/// Result type alias using sketchmatch's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for a single comparison call.
pub type CompareResult<T> = std::result::Result<T, CompareError>;

/// Core error type for sketchmatch operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Face comparison failed
    #[error("Comparison error: {0}")]
    Compare(#[from] CompareError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error from a single call to the face comparison capability.
///
/// Kept separate from [`Error`] so callers can tell "this image has no
/// detectable face" apart from a transient service failure and apply
/// different retry policies. The matcher recovers from all variants by
/// skipping the candidate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    /// The service could not detect a face in the source or target image.
    #[error("no face detected: {0}")]
    NoFaceDetected(String),

    /// The service answered but with a failure (5xx, unparseable body).
    #[error("comparison service error: {0}")]
    Service(String),

    /// The request never got a usable answer (timeout, DNS, connect).
    #[error("comparison request failed: {0}")]
    Request(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

impl From<reqwest::Error> for CompareError {
    fn from(e: reqwest::Error) -> Self {
        CompareError::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("missing COMPARE_BASE_URL".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: missing COMPARE_BASE_URL"
        );
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("empty sketch".to_string());
        assert_eq!(err.to_string(), "Invalid input: empty sketch");
    }

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("photo directory".to_string());
        assert_eq!(err.to_string(), "Not found: photo directory");
    }

    #[test]
    fn test_compare_error_display_no_face() {
        let err = CompareError::NoFaceDetected("source image".to_string());
        assert_eq!(err.to_string(), "no face detected: source image");
    }

    #[test]
    fn test_compare_error_display_service() {
        let err = CompareError::Service("HTTP 500".to_string());
        assert_eq!(err.to_string(), "comparison service error: HTTP 500");
    }

    #[test]
    fn test_compare_error_display_request() {
        let err = CompareError::Request("connection refused".to_string());
        assert_eq!(err.to_string(), "comparison request failed: connection refused");
    }

    #[test]
    fn test_compare_error_wraps_into_error() {
        let err: Error = CompareError::Service("HTTP 503".to_string()).into();
        assert_eq!(err.to_string(), "Comparison error: comparison service error: HTTP 503");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        assert!(err.to_string().starts_with("Serialization error:"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("I/O error:"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
        assert_send::<CompareError>();
        assert_sync::<CompareError>();
    }
}
