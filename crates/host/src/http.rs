//! HTTP server for the browser panel
//!
//! Serves the embedded UI assets plus a dynamically generated /config.js
//! that tells the page which port the WebSocket bridge is on, so the same
//! embedded bytes work whatever ports the host actually bound.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    routing::get,
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::embedded;

// Shared state
#[derive(Clone)]
pub struct AppState {
    pub ws_port: u16,
}

// Routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(serve_index))
        .route("/config.js", get(serve_config_js))
        .route("/api/health", get(health_check))
        .route("/*path", get(serve_static))
        .with_state(state)
        .layer(cors)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

/// Serve /config.js with the bridge port baked in
async fn serve_config_js(State(state): State<AppState>) -> Response<Body> {
    let js = format!("window.PEERCHAT_CONFIG = {{ wsPort: {} }};", state.ws_port);
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/javascript")
        .body(Body::from(js))
        .unwrap()
}

/// Serve index.html at root
async fn serve_index() -> Response<Body> {
    match embedded::get_asset("index.html") {
        Some((data, mime)) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, mime)
            .body(Body::from(data))
            .unwrap(),
        None => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::from("index.html not found"))
            .unwrap(),
    }
}

/// Serve embedded static file
async fn serve_static(Path(path): Path<String>) -> Response<Body> {
    match embedded::get_asset(&path) {
        Some((data, mime)) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, mime)
            .header(header::CACHE_CONTROL, "public, max-age=3600")
            .body(Body::from(data))
            .unwrap(),
        None => {
            // Unknown paths fall back to the panel page
            if let Some((data, mime)) = embedded::get_asset("index.html") {
                Response::builder()
                    .status(StatusCode::OK)
                    .header(header::CONTENT_TYPE, mime)
                    .body(Body::from(data))
                    .unwrap()
            } else {
                Response::builder()
                    .status(StatusCode::NOT_FOUND)
                    .body(Body::from("Not Found"))
                    .unwrap()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;

    async fn body_string(response: Response<Body>) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn config_js_carries_ws_port() {
        let app = router(AppState { ws_port: 4321 });
        let response = app
            .oneshot(Request::builder().uri("/config.js").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/javascript"
        );
        let body = body_string(response).await;
        assert_eq!(body, "window.PEERCHAT_CONFIG = { wsPort: 4321 };");
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let app = router(AppState { ws_port: 1 });
        let response = app
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("\"status\":\"ok\""));
    }

    #[tokio::test]
    async fn root_serves_panel_page() {
        let app = router(AppState { ws_port: 1 });
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("settings-username"));
    }
}
