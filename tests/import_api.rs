use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use html_import::server::{create_router, AppState};
use html_import::{HtmlImporter, ImportError, MarkdownConverter, PathResolver};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

struct StubConverter {
    calls: AtomicUsize,
    fail: bool,
}

impl StubConverter {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail: false,
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail: true,
        })
    }
}

#[async_trait]
impl MarkdownConverter for StubConverter {
    async fn convert(&self, html_path: &Path) -> html_import::Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ImportError::Conversion {
                reason: "browser crashed".to_string(),
            });
        }
        let stem = html_path.file_stem().unwrap().to_string_lossy();
        Ok(Some(format!("# {}\n", stem)))
    }
}

fn app(root: &Path, converter: Arc<StubConverter>) -> axum::Router {
    let importer = HtmlImporter::new(PathResolver::new(root), converter);
    create_router(Arc::new(AppState { importer }))
}

async fn post_import(app: axum::Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/import-html")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let tmp = TempDir::new().unwrap();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let response = app(tmp.path(), StubConverter::new())
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_import_markdown() {
    let tmp = TempDir::new().unwrap();
    let converter = StubConverter::new();

    let (status, body) = post_import(
        app(tmp.path(), converter.clone()),
        json!({
            "html": "<h1>Access sessions</h1>",
            "url": "https://example.com/apis/access-sessions",
            "title": "Access sessions",
            "target_folder": "docs/baikal-tech",
        }),
    )
    .await;

    let dir = tmp.path().join("docs").join("baikal-tech").join("apis");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(
        body["saved_html"],
        dir.join("access-sessions.html").display().to_string()
    );
    assert_eq!(
        body["saved_markdown"],
        dir.join("access-sessions.md").display().to_string()
    );
    assert_eq!(converter.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        std::fs::read_to_string(dir.join("access-sessions.md")).unwrap(),
        "# access-sessions\n"
    );
}

#[tokio::test]
async fn test_import_html_only() {
    let tmp = TempDir::new().unwrap();
    let converter = StubConverter::new();

    let (status, body) = post_import(
        app(tmp.path(), converter.clone()),
        json!({
            "html": "<p>overview</p>",
            "relative_path": "/products/overview",
            "output_format": "html",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("saved_markdown").is_none());
    assert_eq!(converter.calls.load(Ordering::SeqCst), 0);
    assert!(tmp.path().join("products").join("overview.html").exists());
    assert!(!tmp.path().join("products").join("overview.md").exists());
}

#[tokio::test]
async fn test_missing_html_is_bad_request() {
    let tmp = TempDir::new().unwrap();

    let (status, body) = post_import(
        app(tmp.path(), StubConverter::new()),
        json!({ "url": "https://example.com/page" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Missing html in request body");
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_conversion_failure_keeps_html() {
    let tmp = TempDir::new().unwrap();

    let (status, body) = post_import(
        app(tmp.path(), StubConverter::failing()),
        json!({
            "html": "<p>x</p>",
            "relative_path": "/guide/setup",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("browser crashed"));
    assert!(tmp.path().join("guide").join("setup.html").exists());
    assert!(!tmp.path().join("guide").join("setup.md").exists());
}

#[tokio::test]
async fn test_traversal_stays_under_root() {
    let tmp = TempDir::new().unwrap();

    let (status, body) = post_import(
        app(tmp.path(), StubConverter::new()),
        json!({
            "html": "<p>x</p>",
            "relative_path": "/passwd",
            "target_folder": "../../etc",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let saved = body["saved_html"].as_str().unwrap();
    assert!(Path::new(saved).starts_with(tmp.path()));
    assert!(tmp.path().join("etc").join("passwd.html").exists());
}
