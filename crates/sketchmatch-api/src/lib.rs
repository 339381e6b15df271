//! sketchmatch-api - HTTP server for sketch-to-photo face matching.
//!
//! The router and application state live in the library so integration
//! tests can serve the real app with a scripted comparison backend.

pub mod handlers;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use uuid::Uuid;

use sketchmatch_compare::CompareBackend;
use sketchmatch_core::defaults;

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically — useful for
/// log correlation when a single upload fans out into many comparison calls.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Face comparison backend (None if COMPARE_BASE_URL is not configured).
    pub compare: Option<Arc<dyn CompareBackend>>,
    /// Directory of candidate reference photos.
    pub photo_dir: PathBuf,
    /// Directory where uploaded sketches are persisted.
    pub upload_dir: PathBuf,
}

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sketchmatch API",
        description = "Face-sketch to reference-photo matching service"
    ),
    paths(handlers::match_sketch, handlers::health_check),
    tags(
        (name = "Match", description = "Sketch upload and matching"),
        (name = "System", description = "Health checks")
    )
)]
struct ApiDoc;

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let max_upload = max_upload_bytes();

    Router::new()
        .route("/", get(handlers::index).post(handlers::match_sketch))
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(openapi_json))
        .nest_service(
            "/static/photos",
            ServeDir::new(&state.photo_dir),
        )
        .nest_service(
            "/static/uploads",
            ServeDir::new(&state.upload_dir),
        )
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(RequestBodyLimitLayer::new(max_upload))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .with_state(state)
}

/// Maximum accepted upload size, overridable via MAX_UPLOAD_BYTES.
pub fn max_upload_bytes() -> usize {
    std::env::var(defaults::ENV_MAX_UPLOAD_BYTES)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults::MAX_UPLOAD_BYTES)
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    ServiceUnavailable(String),
    Internal(String),
}

impl From<sketchmatch_core::Error> for ApiError {
    fn from(err: sketchmatch_core::Error) -> Self {
        match &err {
            sketchmatch_core::Error::NotFound(msg) => ApiError::NotFound(msg.clone()),
            sketchmatch_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_from_not_found() {
        let err: ApiError =
            sketchmatch_core::Error::NotFound("photo directory".to_string()).into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_api_error_from_invalid_input() {
        let err: ApiError = sketchmatch_core::Error::InvalidInput("bad".to_string()).into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_api_error_from_io_is_internal() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ApiError = sketchmatch_core::Error::Io(io).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn test_default_max_upload() {
        // Without the env override the compiled default applies
        if std::env::var(defaults::ENV_MAX_UPLOAD_BYTES).is_err() {
            assert_eq!(max_upload_bytes(), defaults::MAX_UPLOAD_BYTES);
        }
    }
}
