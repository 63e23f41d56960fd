use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::fmt;
use tinyurl_core::{ShortCode, ShortUrl, Store};
use tinyurl_gateway::app::SHORTEN_PATH;
use tinyurl_gateway::{App, AppState};
use tinyurl_generator::SeqGenerator;
use tinyurl_shortener::TinyUrl;
use tinyurl_storage::InMemoryStore;
use tower::ServiceExt;

const BASE_URL: &str = "http://localhost:8080";

fn app() -> Router {
    let generator = SeqGenerator::with_prefix("tu").unwrap();
    let shortener = TinyUrl::new(InMemoryStore::new(), generator).with_base_url(BASE_URL);
    App::router(AppState::new(shortener))
}

fn shorten_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(SHORTEN_PATH)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn shorten_returns_short_and_original_url() {
    let response = app()
        .oneshot(shorten_request(json!({ "url": "https://example.com/long" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "short": "http://localhost:8080/tu000000", "url": "https://example.com/long" })
    );
}

#[tokio::test]
async fn short_code_redirects_to_original_url() {
    let app = app();

    app.clone()
        .oneshot(shorten_request(json!({ "url": "https://example.com/long" })))
        .await
        .unwrap();

    let response = app.oneshot(get("/tu000000")).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "https://example.com/long"
    );
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    let response = app().oneshot(get("/missing")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "short url not found: missing" })
    );
}

#[tokio::test]
async fn overlong_code_is_bad_request() {
    let response = app()
        .oneshot(get(&format!("/{}", "a".repeat(22))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_url_is_bad_request() {
    let response = app()
        .oneshot(shorten_request(json!({ "url": "  " })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({ "error": "url cannot be empty" }));
}

#[tokio::test]
async fn invalid_generated_code_is_internal_error() {
    let shortener = TinyUrl::new(InMemoryStore::new(), || "node-eu-west-1a-000000");
    let response = App::router(AppState::new(shortener))
        .oneshot(shorten_request(json!({ "url": "https://example.com" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn health_reports_ok() {
    let response = app().oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "status": "ok" }));
}

#[derive(Debug)]
struct Down;

impl fmt::Display for Down {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("store is down")
    }
}

impl std::error::Error for Down {}

struct DownStore;

#[async_trait]
impl Store for DownStore {
    type Error = Down;

    async fn insert(&self, _code: &ShortCode, _record: ShortUrl) -> Result<(), Down> {
        Err(Down)
    }

    async fn get(&self, _code: &ShortCode) -> Result<Option<ShortUrl>, Down> {
        Err(Down)
    }

    fn is_already_exists(&self, _err: &Down) -> bool {
        false
    }
}

#[tokio::test]
async fn store_failures_are_internal_errors() {
    let app = App::router(AppState::new(TinyUrl::new(
        DownStore,
        SeqGenerator::with_prefix("tu").unwrap(),
    )));

    let response = app
        .clone()
        .oneshot(shorten_request(json!({ "url": "https://example.com" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = app.oneshot(get("/tu000000")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
