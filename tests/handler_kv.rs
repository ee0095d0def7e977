mod common;

use axum::Router;
use axum::http::StatusCode;
use axum_test::TestServer;
use common::{InMemoryCache, InMemoryRepository, create_test_state};
use parcel_tracker::api::routes::kv_routes;
use parcel_tracker::application::services::MAX_TTL;
use std::sync::Arc;
use std::time::Duration;

fn server(cache: &Arc<InMemoryCache>) -> TestServer {
    let state = create_test_state(Arc::new(InMemoryRepository::new()), cache.clone());
    let app = Router::new().merge(kv_routes()).with_state(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_put_then_get() {
    let cache = Arc::new(InMemoryCache::new());
    let server = server(&cache);

    let response = server.put("/kv/maintenance.banner").text("Back at 10:00").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["key"], "maintenance.banner");
    assert!(json.get("ttl_seconds").is_none());

    let response = server.get("/kv/maintenance.banner").await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["value"], "Back at 10:00");

    // Stored in its own namespace, without expiry
    assert!(cache.entry("kv:maintenance.banner").is_some());
    assert_eq!(cache.ttl_of("kv:maintenance.banner"), None);
}

#[tokio::test]
async fn test_put_with_ttl() {
    let cache = Arc::new(InMemoryCache::new());
    let server = server(&cache);

    let response = server
        .put("/kv/motd")
        .add_query_param("ttl_seconds", "60")
        .text("hello")
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["ttl_seconds"], 60);
    assert_eq!(cache.ttl_of("kv:motd"), Some(Duration::from_secs(60)));
}

#[tokio::test]
async fn test_put_zero_ttl_is_bad_request() {
    let cache = Arc::new(InMemoryCache::new());
    let server = server(&cache);

    let response = server
        .put("/kv/motd")
        .add_query_param("ttl_seconds", "0")
        .text("hello")
        .await;

    response.assert_status_bad_request();
    assert!(cache.entry("kv:motd").is_none());
}

#[tokio::test]
async fn test_put_ttl_beyond_limit_is_bad_request() {
    let cache = Arc::new(InMemoryCache::new());
    let server = server(&cache);
    let too_long = (MAX_TTL.as_secs() + 1).to_string();

    let response = server
        .put("/kv/motd")
        .add_query_param("ttl_seconds", &too_long)
        .text("hello")
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["details"]["max"], MAX_TTL.as_secs());
    assert!(cache.entry("kv:motd").is_none());
}

#[tokio::test]
async fn test_put_ttl_at_limit_is_accepted() {
    let cache = Arc::new(InMemoryCache::new());
    let server = server(&cache);

    let response = server
        .put("/kv/motd")
        .add_query_param("ttl_seconds", MAX_TTL.as_secs())
        .text("hello")
        .await;

    response.assert_status_ok();
    assert_eq!(cache.ttl_of("kv:motd"), Some(MAX_TTL));
}

#[tokio::test]
async fn test_get_missing_key() {
    let server = server(&Arc::new(InMemoryCache::new()));

    let response = server.get("/kv/absent").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_delete() {
    let cache = Arc::new(InMemoryCache::new());
    cache.insert_raw("kv:flag", b"on");
    let server = server(&cache);

    server
        .delete("/kv/flag")
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server.delete("/kv/flag").await.assert_status_not_found();
}

#[tokio::test]
async fn test_backend_failure_is_unavailable() {
    let cache = Arc::new(InMemoryCache::new());
    cache.fail_reads();
    let server = server(&cache);

    let response = server.get("/kv/motd").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json::<serde_json::Value>()["error"]["code"], "unavailable");
}
