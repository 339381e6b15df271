//! Integration tests for the match HTTP endpoint.
//!
//! Serves the real router on an ephemeral port with a scripted comparison
//! backend and temporary photo/upload directories, then drives it with
//! reqwest multipart requests.

use std::sync::Arc;

use sketchmatch_api::{app, AppState};
use sketchmatch_compare::mock::ScriptedCompareBackend;
use sketchmatch_compare::CompareBackend;
use tempfile::TempDir;

struct TestServer {
    base_url: String,
    photo_dir: TempDir,
    upload_dir: TempDir,
}

impl TestServer {
    /// Serve the app with the given backend; directories start empty.
    async fn spawn(backend: Option<Arc<dyn CompareBackend>>) -> Self {
        let photo_dir = tempfile::tempdir().unwrap();
        let upload_dir = tempfile::tempdir().unwrap();

        let state = AppState {
            compare: backend,
            photo_dir: photo_dir.path().to_path_buf(),
            upload_dir: upload_dir.path().to_path_buf(),
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app(state)).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            photo_dir,
            upload_dir,
        }
    }

    fn add_photo(&self, name: &str, bytes: &[u8]) {
        std::fs::write(self.photo_dir.path().join(name), bytes).unwrap();
    }
}

fn sketch_form(filename: &str, bytes: &[u8]) -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(bytes.to_vec())
        .file_name(filename.to_string())
        .mime_str("image/png")
        .unwrap();
    reqwest::multipart::Form::new().part("sketch", part)
}

async fn post_sketch(server: &TestServer, filename: &str, bytes: &[u8]) -> reqwest::Response {
    reqwest::Client::new()
        .post(&server.base_url)
        .multipart(sketch_form(filename, bytes))
        .send()
        .await
        .expect("request should complete")
}

#[tokio::test]
async fn test_index_serves_upload_form() {
    let server = TestServer::spawn(Some(Arc::new(ScriptedCompareBackend::new()))).await;

    let body = reqwest::get(&server.base_url)
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("multipart/form-data"));
    assert!(body.contains("name=\"sketch\""));
}

#[tokio::test]
async fn test_missing_file_part() {
    let server = TestServer::spawn(Some(Arc::new(ScriptedCompareBackend::new()))).await;

    let form = reqwest::multipart::Form::new().text("unrelated", "field");
    let response = reqwest::Client::new()
        .post(&server.base_url)
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "No file part");
}

#[tokio::test]
async fn test_empty_filename() {
    let server = TestServer::spawn(Some(Arc::new(ScriptedCompareBackend::new()))).await;

    let response = post_sketch(&server, "", b"sketch-bytes").await;
    assert_eq!(response.text().await.unwrap(), "No selected file");
}

#[tokio::test]
async fn test_invalid_file_type() {
    let server = TestServer::spawn(Some(Arc::new(ScriptedCompareBackend::new()))).await;

    let response = post_sketch(&server, "sketch.gif", b"sketch-bytes").await;
    assert_eq!(response.text().await.unwrap(), "Invalid file type");
}

#[tokio::test]
async fn test_match_renders_result_view() {
    let backend = ScriptedCompareBackend::new()
        .with_match("alice-img", 72.25)
        .with_match("bob-img", 85.5);
    let server = TestServer::spawn(Some(Arc::new(backend))).await;
    server.add_photo("alice.jpg", b"alice-img");
    server.add_photo("bob.jpg", b"bob-img");

    let response = post_sketch(&server, "suspect.png", b"sketch-bytes").await;
    assert_eq!(response.status(), 200);

    let body = response.text().await.unwrap();
    assert!(body.contains("bob.jpg"), "best match missing from: {body}");
    assert!(body.contains("85.50"));
    assert!(body.contains("Match found"));
    // Name is the filename stem before the first dot
    assert!(body.contains("<dd>bob</dd>"));
    assert!(body.contains("Unknown"));
    assert!(body.contains("suspect.png"));
}

#[tokio::test]
async fn test_no_match_found() {
    let backend = ScriptedCompareBackend::new().with_no_match("alice-img");
    let server = TestServer::spawn(Some(Arc::new(backend))).await;
    server.add_photo("alice.jpg", b"alice-img");

    let response = post_sketch(&server, "suspect.png", b"sketch-bytes").await;
    assert_eq!(response.text().await.unwrap(), "No match found");
}

#[tokio::test]
async fn test_empty_gallery_is_no_match() {
    let server = TestServer::spawn(Some(Arc::new(ScriptedCompareBackend::new()))).await;

    let response = post_sketch(&server, "suspect.png", b"sketch-bytes").await;
    assert_eq!(response.text().await.unwrap(), "No match found");
}

#[tokio::test]
async fn test_sketch_is_persisted_to_upload_dir() {
    let server = TestServer::spawn(Some(Arc::new(ScriptedCompareBackend::new()))).await;

    let _ = post_sketch(&server, "suspect.png", b"sketch-bytes").await;

    let stored = std::fs::read(server.upload_dir.path().join("suspect.png")).unwrap();
    assert_eq!(stored, b"sketch-bytes");
}

#[tokio::test]
async fn test_uploaded_filename_is_sanitized() {
    let server = TestServer::spawn(Some(Arc::new(ScriptedCompareBackend::new()))).await;

    let _ = post_sketch(&server, "../../escape.png", b"sketch-bytes").await;

    // Path components are stripped before the file touches the upload dir
    assert!(server.upload_dir.path().join("escape.png").is_file());
    assert!(!server.upload_dir.path().parent().unwrap().join("escape.png").exists());
}

#[tokio::test]
async fn test_unconfigured_backend_returns_503() {
    let server = TestServer::spawn(None).await;

    let response = post_sketch(&server, "suspect.png", b"sketch-bytes").await;
    assert_eq!(response.status(), 503);

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("COMPARE_BASE_URL"));
}

#[tokio::test]
async fn test_validation_precedes_backend_requirement() {
    // Contract errors answer before the backend is consulted
    let server = TestServer::spawn(None).await;

    let response = post_sketch(&server, "sketch.gif", b"sketch-bytes").await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "Invalid file type");
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = TestServer::spawn(Some(Arc::new(ScriptedCompareBackend::new()))).await;

    let body: serde_json::Value = reqwest::get(format!("{}/health", server.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["compare_backend"], "ok");
}

#[tokio::test]
async fn test_health_reports_unreachable_backend() {
    let backend = ScriptedCompareBackend::new().unhealthy();
    let server = TestServer::spawn(Some(Arc::new(backend))).await;

    let body: serde_json::Value = reqwest::get(format!("{}/health", server.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["compare_backend"], "unreachable");
}

#[tokio::test]
async fn test_health_reports_unconfigured_backend() {
    let server = TestServer::spawn(None).await;

    let body: serde_json::Value = reqwest::get(format!("{}/health", server.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["compare_backend"], "unconfigured");
}

#[tokio::test]
async fn test_static_photo_serving() {
    let server = TestServer::spawn(Some(Arc::new(ScriptedCompareBackend::new()))).await;
    server.add_photo("alice.jpg", b"alice-img");

    let response = reqwest::get(format!("{}/static/photos/alice.jpg", server.base_url))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.bytes().await.unwrap().as_ref(), b"alice-img");
}

#[tokio::test]
async fn test_openapi_json_served() {
    let server = TestServer::spawn(None).await;

    let body: serde_json::Value = reqwest::get(format!("{}/openapi.json", server.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["info"]["title"], "Sketchmatch API");
}
