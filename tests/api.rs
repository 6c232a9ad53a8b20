//! End-to-end tests for the HTTP surface, with every upstream mocked.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;
use trisearch::config::{Settings, SourceSettings};
use trisearch::web::{create_router, AppState};
use wiremock::matchers::{header as header_eq, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_upstreams(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(header_eq("user-agent", "trisearch-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": { "search": [ { "title": "Sora", "snippet": "<b>Sora</b> 2" } ] }
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/rest_v1/page/summary/Sora"))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "AbstractURL": "https://example.com/sora",
            "AbstractText": "A video model",
            "RelatedTopics": []
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": [ { "objectID": "7", "title": "Show HN: Sora", "url": "https://example.com/sora" } ]
        })))
        .mount(server)
        .await;
}

fn app_for(server: &MockServer) -> Router {
    let mut settings = Settings::default();
    settings.outgoing.user_agent = "trisearch-test/1.0".to_string();
    settings.sources = SourceSettings {
        wikipedia_api: server.uri(),
        duckduckgo_api: server.uri(),
        hackernews_api: server.uri(),
    };
    create_router(AppState::from_settings(settings).unwrap())
}

async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

#[tokio::test]
async fn api_search_merges_sources() {
    let server = MockServer::start().await;
    mount_upstreams(&server).await;

    let (status, headers, body) = get(app_for(&server), "/api/search?q=%20sora%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CACHE_CONTROL], "no-store");
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/json"));

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["query"], "sora");
    assert!(json["tookMs"].is_u64());

    let items = json["items"].as_array().unwrap();
    // HN shares its URL with the DuckDuckGo abstract and loses
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["source"], "encyclopedia");
    assert_eq!(items[0]["snippet"], "Sora 2");
    assert_eq!(items[1]["source"], "instant_answer");
    assert_eq!(items[1]["title"], "DuckDuckGo Instant Answer");
}

#[tokio::test]
async fn api_search_blank_query_skips_upstreams() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    for uri in ["/api/search", "/api/search?q=", "/api/search?q=%20%20"] {
        let (status, _, body) = get(app_for(&server), uri).await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, json!({ "query": "", "items": [], "tookMs": 0 }));
    }
}

#[tokio::test]
async fn api_search_survives_dead_upstreams() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (status, _, body) = get(app_for(&server), "/api/search?q=rust").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["query"], "rust");
    assert_eq!(json["items"], json!([]));
}

#[tokio::test]
async fn api_search_respects_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(3))
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;

    let mut settings = Settings::default();
    settings.search.timeout_ms = 200;
    settings.sources = SourceSettings {
        wikipedia_api: server.uri(),
        duckduckgo_api: server.uri(),
        hackernews_api: server.uri(),
    };
    let app = create_router(AppState::from_settings(settings).unwrap());

    let (status, _, body) = get(app, "/api/search?q=slow").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["items"], json!([]));
    assert!(json["tookMs"].as_u64().unwrap() < 3000);
}

#[tokio::test]
async fn search_page_renders_results() {
    let server = MockServer::start().await;
    mount_upstreams(&server).await;

    let (status, _, body) = get(app_for(&server), "/?q=sora").await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Found 2 results in"));
    assert!(html.contains("instant_answer"));
}

#[tokio::test]
async fn search_page_with_blank_query_shows_form_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (status, _, body) = get(app_for(&server), "/?q=").await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("name=\"q\""));
    assert!(!html.contains("Found"));
}

#[tokio::test]
async fn health_lists_engines() {
    let server = MockServer::start().await;
    let (status, _, body) = get(app_for(&server), "/health").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    let names: Vec<_> = json["engines"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["wikipedia", "duckduckgo", "hackernews"]);
    assert_eq!(json["engines"][2]["source"], "news");
    assert_eq!(
        json["engines"][0]["about"]["website"],
        "https://www.wikipedia.org"
    );
}
