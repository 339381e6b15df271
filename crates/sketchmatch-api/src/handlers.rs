//! HTTP handlers for sketch upload and matching.
//!
//! The upload contract is deliberately plain: validation failures and the
//! no-match case return short text bodies, a successful match renders the
//! embedded result view.

use axum::{
    extract::{Multipart, State},
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::{info, warn};

use sketchmatch_core::{allowed_image_extension, sanitize_filename, MatchReport};
use sketchmatch_gallery::Matcher;

use crate::{ApiError, AppState};

const INDEX_HTML: &str = include_str!("templates/index.html");
const RESULT_HTML: &str = include_str!("templates/result.html");

/// Upload form.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Match an uploaded sketch against the photo gallery.
///
/// Accepts multipart/form-data with a `sketch` image field (png/jpg/jpeg).
/// The sketch is persisted to the upload directory, compared against every
/// gallery photo, and the best match above the similarity threshold is
/// rendered.
///
/// # Returns
/// - 200 with the result view on a match
/// - 200 with a plain-text message for contract errors
///   ("No file part", "No selected file", "Invalid file type", "No match found")
/// - 503 if the comparison backend is not configured
#[utoipa::path(post, path = "/", tag = "Match",
    responses(
        (status = 200, description = "Result view or contract message"),
        (status = 503, description = "Comparison backend not configured"),
    ))]
pub async fn match_sketch(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut sketch: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {}", e)))?
    {
        let field_name = field.name().map(|n| n.to_string());
        match field_name.as_deref() {
            Some("sketch") => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Read error: {}", e)))?;
                sketch = Some((filename, data.to_vec()));
            }
            _ => {} // ignore unknown fields
        }
    }

    let Some((filename, data)) = sketch else {
        return Ok("No file part".into_response());
    };
    if filename.is_empty() || data.is_empty() {
        return Ok("No selected file".into_response());
    }
    if !allowed_image_extension(&filename) {
        return Ok("Invalid file type".into_response());
    }

    let backend = state.compare.as_ref().ok_or_else(|| {
        ApiError::ServiceUnavailable(
            "Comparison backend not configured. Set COMPARE_BASE_URL environment variable."
                .into(),
        )
    })?;

    let filename = sanitize_filename(&filename);
    let dest = state.upload_dir.join(&filename);
    tokio::fs::write(&dest, &data)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to store sketch: {}", e)))?;
    info!(sketch = %filename, "Sketch stored, starting gallery scan");

    let matcher = Matcher::new(backend.clone());
    let outcome = matcher
        .find_best_match_in_dir(&data, &state.photo_dir)
        .await?;

    match outcome.label {
        Some(photo) => {
            let report = MatchReport::new(filename, photo, outcome.score);
            Ok(Html(render_result(&report)).into_response())
        }
        None => {
            info!(sketch = %filename, "No gallery photo matched the sketch");
            Ok("No match found".into_response())
        }
    }
}

/// Health check with comparison-backend reachability.
#[utoipa::path(get, path = "/health", tag = "System",
    responses((status = 200, description = "Service health")))]
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let compare = match &state.compare {
        Some(backend) => match backend.health_check().await {
            Ok(true) => "ok",
            Ok(false) => "unreachable",
            Err(e) => {
                warn!(error = %e, "Comparison backend health check failed");
                "error"
            }
        },
        None => "unconfigured",
    };

    Json(serde_json::json!({
        "status": "ok",
        "compare_backend": compare,
    }))
}

/// Render the result view from the embedded template.
fn render_result(report: &MatchReport) -> String {
    RESULT_HTML
        .replace("{{sketch_path}}", &escape_html(&report.sketch_path))
        .replace("{{photo_path}}", &escape_html(&report.photo_path))
        .replace("{{similarity}}", &format!("{:.2}", report.similarity))
        .replace("{{name}}", &escape_html(&report.details.name))
        .replace("{{age}}", &escape_html(&report.details.age))
        .replace("{{dob}}", &escape_html(&report.details.dob))
        .replace("{{interpretation}}", &escape_html(&report.interpretation))
}

/// Minimal HTML escaping for text interpolated into the result view.
fn escape_html(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            c => c.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_result_fills_all_fields() {
        let report = MatchReport::new("sketch.png", "alice.jpg", 87.654);
        let html = render_result(&report);

        assert!(html.contains("sketch.png"));
        assert!(html.contains("alice.jpg"));
        assert!(html.contains("87.65"));
        assert!(html.contains("alice"));
        assert!(html.contains("Unknown"));
        assert!(html.contains("Match found"));
        assert!(!html.contains("{{"), "unfilled placeholder in: {html}");
    }

    #[test]
    fn test_render_result_low_similarity_interpretation() {
        // Scores at or below 50 never reach the view through the matcher,
        // but the template must render whatever the report says.
        let report = MatchReport::new("sketch.png", "bob.jpg", 42.0);
        let html = render_result(&report);
        assert!(html.contains("Low similarity"));
    }

    #[test]
    fn test_render_result_escapes_html() {
        let report = MatchReport::new("<img>.png", "alice.jpg", 60.0);
        let html = render_result(&report);
        assert!(html.contains("&lt;img&gt;.png"));
        assert!(!html.contains("<img>.png"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a&b"), "a&amp;b");
        assert_eq!(escape_html("\"x\""), "&quot;x&quot;");
        assert_eq!(escape_html("plain.jpg"), "plain.jpg");
    }

    #[test]
    fn test_index_page_has_upload_form() {
        assert!(INDEX_HTML.contains("multipart/form-data"));
        assert!(INDEX_HTML.contains("name=\"sketch\""));
    }
}
