#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{ACCESS_CONTROL_REQUEST_METHOD, CONTENT_TYPE, ORIGIN};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use larder_api::config::ServerConfig;
use larder_api::router::build_app_router;
use larder_api::state::AppState;
use larder_db::store::MemoryStore;
use tower::ServiceExt;

/// Build a test `ServerConfig` with the defaults every variable falls back to.
pub fn test_config() -> ServerConfig {
    ServerConfig::from_lookup(|_| None).expect("defaults should be valid")
}

/// Build the full application router over the given in-memory store.
///
/// Uses the same builder as `main.rs`, so tests exercise the production
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery).
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    build_app_with_config(store, test_config())
}

pub fn build_app_with_config(store: Arc<MemoryStore>, config: ServerConfig) -> Router {
    build_app_router(AppState::new(store, config))
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::POST, uri, body.to_string()).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::PATCH, uri, body.to_string()).await
}

/// Send a raw, possibly malformed, JSON body.
pub async fn send_json(app: Router, method: Method, uri: &str, body: String) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Send a CORS preflight request from `origin`.
pub async fn preflight(app: Router, uri: &str, origin: &str, method: Method) -> Response {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri(uri)
        .header(ORIGIN, origin)
        .header(ACCESS_CONTROL_REQUEST_METHOD, method.as_str())
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Insert an item through the API and return its id.
pub async fn insert_item(app: &Router, body: serde_json::Value) -> i64 {
    let response = post_json(app.clone(), "/insert", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    body_json(response).await["insertedID"].as_i64().unwrap()
}
