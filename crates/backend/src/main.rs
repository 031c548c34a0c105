mod api;
mod storage;

use std::path::{Path, PathBuf};

use axum::http::HeaderValue;
use axum::{response::Html, routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

/// Build a cache-controlled static file router.
///
/// Separated so tests can exercise the caching layer with arbitrary directories.
fn cached_static_router(dir: &Path, cache_header: &'static str) -> Router {
    let layer = SetResponseHeaderLayer::overriding(
        axum::http::header::CACHE_CONTROL,
        HeaderValue::from_static(cache_header),
    );
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(layer)
}

const CACHE_1DAY: &str = "public, max-age=86400, must-revalidate";
const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Build the full application router.
fn build_app(storage: std::sync::Arc<storage::Storage>, dist_dir: &Path) -> Router {
    let static_files = Router::new()
        .nest("/static", cached_static_router(&dist_dir.join("static"), CACHE_1DAY))
        .nest(
            "/assets",
            cached_static_router(&dist_dir.join("assets"), CACHE_IMMUTABLE),
        );

    let index_path = dist_dir.join("index.html");
    api::router(storage)
        .route("/", get(move || serve_index(index_path.clone())))
        .merge(static_files)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("papapp_backend=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let db_path =
        PathBuf::from(std::env::var("DB_PATH").unwrap_or_else(|_| "data/labels.redb".to_string()));
    if let Some(parent) = db_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::error!(path = %parent.display(), error = %e, "Failed to create database directory");
            std::process::exit(1);
        }
    }
    let storage = storage::Storage::open(&db_path).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to open label storage");
        std::process::exit(1);
    });

    let dist_dir = PathBuf::from(std::env::var("DIST_DIR").unwrap_or_else(|_| "dist".to_string()));
    let app = build_app(storage, &dist_dir);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };
    tracing::info!(%addr, db = %db_path.display(), "Labeling service listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Server stopped");
    }
}

async fn serve_index(index_path: PathBuf) -> Html<String> {
    // Try to serve the built frontend, fall back to a simple message
    match tokio::fs::read_to_string(&index_path).await {
        Ok(html) => Html(html),
        Err(_) => Html(
            r#"<!DOCTYPE html>
<html>
<head><title>Papapp Labeler</title></head>
<body>
<h1>Papapp Labeler</h1>
<p>Frontend not built yet. The labeling API is available at <code>/wakeup</code> and <code>/labeling</code>.</p>
</body>
</html>"#
                .to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    /// Lay out a fake `dist/` with an index, a static file and a hashed bundle.
    fn temp_dist() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>labeler</html>").unwrap();
        std::fs::create_dir_all(dir.path().join("static")).unwrap();
        std::fs::write(dir.path().join("static/favicon.svg"), "<svg/>").unwrap();
        std::fs::create_dir_all(dir.path().join("assets")).unwrap();
        std::fs::write(dir.path().join("assets/app-abc123.js"), "bundle()").unwrap();
        dir
    }

    fn test_app(dist: &Path) -> (Router, tempfile::TempDir) {
        let db_dir = tempfile::tempdir().unwrap();
        let storage = storage::Storage::open(&db_dir.path().join("labels.redb")).unwrap();
        (build_app(storage, dist), db_dir)
    }

    async fn get_uri(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_index_served_from_dist() {
        let dist = temp_dist();
        let (app, _db) = test_app(dist.path());
        let resp = get_uri(app, "/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"<html>labeler</html>");
    }

    #[tokio::test]
    async fn test_index_fallback_without_build() {
        let dist = tempfile::tempdir().unwrap();
        let (app, _db) = test_app(dist.path());
        let resp = get_uri(app, "/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("Frontend not built yet"));
    }

    #[tokio::test]
    async fn test_static_files_have_1day_cache() {
        let dist = temp_dist();
        let (app, _db) = test_app(dist.path());
        let resp = get_uri(app, "/static/favicon.svg").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "public, max-age=86400, must-revalidate"
        );
    }

    #[tokio::test]
    async fn test_bundles_have_immutable_cache() {
        let dist = temp_dist();
        let (app, _db) = test_app(dist.path());
        let resp = get_uri(app, "/assets/app-abc123.js").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "public, max-age=31536000, immutable"
        );
    }

    #[tokio::test]
    async fn test_missing_static_file_returns_404() {
        let dist = temp_dist();
        let (app, _db) = test_app(dist.path());
        let resp = get_uri(app, "/static/nonexistent.txt").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_api_routes_are_mounted_with_cors() {
        let dist = temp_dist();
        let (app, _db) = test_app(dist.path());
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/wakeup")
                    .header("origin", "https://labeler.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }
}
