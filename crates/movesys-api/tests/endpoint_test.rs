#![allow(clippy::unwrap_used)]
// Verb/path mapping tests for `ResourceEndpoint`.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use movesys_api::{MemorySession, NoRedirect, ResourceEndpoint, Transport, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(resource: &str) -> (MockServer, ResourceEndpoint) {
    let server = MockServer::start().await;
    let config = TransportConfig::new(server.uri()).with_local_fallbacks(Vec::<String>::new());
    let transport = Transport::new(
        &config,
        Arc::new(MemorySession::new()),
        Arc::new(NoRedirect),
    )
    .unwrap();
    (server, ResourceEndpoint::new(Arc::new(transport), resource))
}

fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

// ── Collection ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_passes_query_parameters() {
    let (server, endpoint) = setup("/api/v1/vehicles").await;

    Mock::given(method("GET"))
        .and(path("/api/v1/vehicles"))
        .and(query_param("status", "available"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }])))
        .expect(1)
        .mount(&server)
        .await;

    let response = endpoint
        .list(&params(&[("status", "available")]))
        .await
        .unwrap();
    assert_eq!(response.body, Some(json!([{ "id": 1 }])));
}

#[tokio::test]
async fn test_create_posts_body_unchanged() {
    let (server, endpoint) = setup("/api/v1/users").await;
    let body = json!({ "firstName": "Ana", "role": "driver" });

    Mock::given(method("POST"))
        .and(path("/api/v1/users"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 5 })))
        .expect(1)
        .mount(&server)
        .await;

    let response = endpoint.create(&body).await.unwrap();
    assert_eq!(response.body, Some(json!({ "id": 5 })));
}

#[tokio::test]
async fn test_search_sends_q_and_extra_params() {
    let (server, endpoint) = setup("/api/v1/deliveries").await;

    Mock::given(method("GET"))
        .and(path("/api/v1/deliveries/search"))
        .and(query_param("q", "lima"))
        .and(query_param("status", "pending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    endpoint
        .search("lima", &params(&[("status", "pending")]))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_read_targets_sub_path() {
    let (server, endpoint) = setup("/api/v1/reports/").await;

    Mock::given(method("GET"))
        .and(path("/api/v1/reports/fuel/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "totalLiters": 120 })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/reports"))
        .and(query_param("month", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let summary = endpoint.read("/fuel/summary", &[]).await.unwrap();
    assert_eq!(summary.body, Some(json!({ "totalLiters": 120 })));

    let root = endpoint.read("", &params(&[("month", "3")])).await.unwrap();
    assert_eq!(root.body, Some(json!([])));
}

// ── Single item ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_item_verbs_target_id_path() {
    let (server, endpoint) = setup("/api/v1/vehicles/").await;
    let body = json!({ "status": "in_use" });

    Mock::given(method("GET"))
        .and(path("/api/v1/vehicles/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 7 })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/vehicles/7"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/vehicles/7"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 7 })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/vehicles/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(endpoint.path(), "/api/v1/vehicles");
    assert_eq!(
        endpoint.get_by_id("7").await.unwrap().body,
        Some(json!({ "id": 7 }))
    );
    assert!(endpoint.update("7", &body).await.unwrap().is_no_content());
    assert!(!endpoint.patch("7", &body).await.unwrap().is_no_content());
    assert!(endpoint.delete("7").await.unwrap().is_no_content());
}

// ── Bulk ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_bulk_operations_wrap_payloads() {
    let (server, endpoint) = setup("/maintenances").await;
    let resources = vec![json!({ "description": "oil" }), json!({ "description": "tires" })];

    Mock::given(method("POST"))
        .and(path("/maintenances/bulk"))
        .and(body_json(json!({ "resources": resources })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/maintenances/bulk"))
        .and(body_json(json!({ "resources": resources })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/maintenances/bulk"))
        .and(body_json(json!({ "ids": ["1", "2"] })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    endpoint.bulk_create(&resources).await.unwrap();
    endpoint.bulk_update(&resources).await.unwrap();
    endpoint
        .bulk_delete(&["1".to_owned(), "2".to_owned()])
        .await
        .unwrap();
}
