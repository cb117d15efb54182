//! End-to-end tests against a running devops-info server.

mod common;

use serde_json::{Value, json};
use std::time::Duration;

// =============================================================================
// Info Endpoint
// =============================================================================

#[tokio::test]
async fn test_index_endpoint_structure() {
    let server = common::TestServer::spawn().await;

    let response = server.get("/").await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    let top_level = body.as_object().unwrap();
    assert_eq!(top_level.len(), 5);
    for key in ["service", "system", "runtime", "request", "endpoints"] {
        assert!(top_level.contains_key(key), "missing key {}", key);
    }

    assert_eq!(body["service"]["name"], "devops-info-service");
    assert_eq!(body["service"]["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["service"]["description"].is_string());
    assert!(body["service"]["framework"].is_string());

    assert!(body["system"]["hostname"].is_string());
    assert!(body["system"]["platform"].is_string());
    assert!(body["system"]["platform_version"].is_string());
    assert!(body["system"]["architecture"].is_string());
    assert!(body["system"]["cpu_count"].is_u64());
    assert!(body["system"]["runtime_version"].is_string());

    assert!(body["runtime"]["uptime_seconds"].is_u64());
    assert!(body["runtime"]["uptime_human"].as_str().unwrap().contains("hours"));
    assert!(body["runtime"]["current_time"].as_str().unwrap().ends_with("+00:00"));
    assert_eq!(body["runtime"]["timezone"], "UTC");

    assert_eq!(
        body["endpoints"],
        json!([
            {"path": "/", "method": "GET", "description": "Service information"},
            {"path": "/health", "method": "GET", "description": "Health check"}
        ])
    );

    server.shutdown().await;
}

#[tokio::test]
async fn test_index_reports_peer_and_user_agent() {
    let server = common::TestServer::spawn().await;

    let response = server
        .client()
        .get(server.url("/"))
        .header("User-Agent", "integration-test/1.0")
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();

    assert_eq!(body["request"]["client_ip"], "127.0.0.1");
    assert_eq!(body["request"]["user_agent"], "integration-test/1.0");
    assert_eq!(body["request"]["method"], "GET");
    assert_eq!(body["request"]["path"], "/");

    server.shutdown().await;
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let server = common::TestServer::spawn().await;

    let requests = (0..16).map(|i| {
        let request = server
            .client()
            .get(server.url("/"))
            .header("User-Agent", format!("client-{}", i));
        async move {
            let body: Value = request.send().await.unwrap().json().await.unwrap();
            (i, body)
        }
    });

    for (i, body) in futures::future::join_all(requests).await {
        assert_eq!(body["request"]["user_agent"], format!("client-{}", i));
        assert_eq!(body["request"]["path"], "/");
        assert_eq!(body["service"]["name"], "devops-info-service");
    }

    server.shutdown().await;
}

// =============================================================================
// Health Endpoint
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let server = common::TestServer::spawn().await;

    let response = server.get("/health").await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
    assert!(body["uptime_seconds"].is_u64());
    assert_eq!(body.as_object().unwrap().len(), 3);

    server.shutdown().await;
}

#[tokio::test]
async fn test_health_uptime_never_decreases() {
    let server = common::TestServer::spawn().await;

    let first: Value = server.get("/health").await.json().await.unwrap();
    tokio::time::sleep(Duration::from_millis(1100)).await;
    let second: Value = server.get("/health").await.json().await.unwrap();

    let t1 = first["uptime_seconds"].as_u64().unwrap();
    let t2 = second["uptime_seconds"].as_u64().unwrap();
    assert!(t2 >= t1);
    assert!(t2 >= 1);

    server.shutdown().await;
}

// =============================================================================
// Errors
// =============================================================================

#[tokio::test]
async fn test_404_error() {
    let server = common::TestServer::spawn().await;

    let response = server.get("/does-not-exist").await;
    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({"error": "Not Found", "message": "Endpoint does not exist"})
    );

    server.shutdown().await;
}

#[tokio::test]
async fn test_post_to_index_is_not_found() {
    let server = common::TestServer::spawn().await;

    let response = server.client().post(server.url("/")).send().await.unwrap();
    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Not Found");

    server.shutdown().await;
}
