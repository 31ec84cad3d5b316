//! API Routes
//!
//! Configures the Axum router with all log server endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    health_handler, list_files_handler, list_logs_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /logs` - Newest matching lines of a log file
/// - `GET /logs/files` - Log files available in the log directory
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin, read-only API
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/logs", get(list_logs_handler))
        .route("/logs/files", get(list_files_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app(log_dir: &std::path::Path) -> Router {
        let config = Config {
            log_dir: log_dir.to_path_buf(),
            ..Config::default()
        };
        create_router(AppState::from_config(&config))
    }

    async fn status_of(app: Router, uri: &str) -> StatusCode {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(status_of(create_test_app(dir.path()), "/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(status_of(create_test_app(dir.path()), "/stats").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_logs_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.log"), "line\n").unwrap();
        assert_eq!(
            status_of(create_test_app(dir.path()), "/logs?fileName=app.log").await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_logs_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            status_of(create_test_app(dir.path()), "/logs?fileName=nonexistent").await,
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            status_of(create_test_app(dir.path()), "/set").await,
            StatusCode::NOT_FOUND
        );
    }
}
