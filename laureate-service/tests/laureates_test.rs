mod common;

use axum::http::StatusCode;
use common::{connected_router, get, record, sample_records};
use laureate_service::dtos::LAUREATE_NOT_FOUND;
use laureate_service::handlers::ENDPOINTS;
use laureate_service::services::{seed, InMemoryLaureateStore};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn list_returns_every_seeded_record_in_an_envelope() {
    let store = Arc::new(InMemoryLaureateStore::new());
    let dataset = sample_records();
    let report = seed(&*store, &dataset).await.unwrap();
    assert_eq!(report.inserted, dataset.len());

    let router = connected_router(store).await;
    let response = get(&router, "/laureates").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    let data = response.body["data"].as_array().unwrap();
    assert_eq!(data.len(), dataset.len());
    assert_eq!(data[0], serde_json::to_value(&dataset[0]).unwrap());
}

#[tokio::test]
async fn list_on_empty_collection_is_still_success() {
    let router = connected_router(Arc::new(InMemoryLaureateStore::new())).await;

    let response = get(&router, "/laureates").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "data": [], "success": true }));
}

#[tokio::test]
async fn get_by_id_returns_the_raw_record_for_each_seeded_id() {
    let dataset = sample_records();
    let store = Arc::new(InMemoryLaureateStore::with_records(dataset.clone()));
    let router = connected_router(store).await;

    for expected in &dataset {
        let response = get(&router, &format!("/laureates/id/{}", expected.id)).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["id"], expected.id);
        assert_eq!(response.body, serde_json::to_value(expected).unwrap());
        assert!(response.body.get("success").is_none());
    }
}

#[tokio::test]
async fn get_by_unknown_id_returns_plain_string_404() {
    let store = Arc::new(InMemoryLaureateStore::with_records(sample_records()));
    let router = connected_router(store).await;

    let response = get(&router, "/laureates/id/999").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!(LAUREATE_NOT_FOUND));
}

#[tokio::test]
async fn get_by_non_numeric_id_is_treated_as_no_match() {
    let store = Arc::new(InMemoryLaureateStore::with_records(sample_records()));
    let router = connected_router(store).await;

    let response = get(&router, "/laureates/id/marie-curie").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!(LAUREATE_NOT_FOUND));
}

#[tokio::test]
async fn get_by_id_returns_first_of_duplicate_ids() {
    let store = Arc::new(InMemoryLaureateStore::with_records(vec![
        record(5, "First", 1931, "Peace"),
        record(5, "Second", 1946, "Peace"),
    ]));
    let router = connected_router(store).await;

    let response = get(&router, "/laureates/id/5").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "First");
}

#[tokio::test]
async fn store_failure_after_gate_surfaces_as_database_error() {
    let store = Arc::new(InMemoryLaureateStore::with_records(sample_records()));
    let router = connected_router(store.clone()).await;
    // The gate still believes the database is up until the next heartbeat
    store.set_available(false);

    let response = get(&router, "/laureates").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "Database error");
}

#[tokio::test]
async fn index_lists_every_route() {
    let router = connected_router(Arc::new(InMemoryLaureateStore::new())).await;

    let response = get(&router, "/").await;

    assert_eq!(response.status, StatusCode::OK);
    let listed: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["path"].as_str().unwrap())
        .collect();
    assert_eq!(listed, ENDPOINTS.iter().map(|e| e.path).collect::<Vec<_>>());
    assert!(response.body[0]["methods"]
        .as_array()
        .unwrap()
        .contains(&json!("GET")));
}

#[tokio::test]
async fn every_listed_route_is_served() {
    let store = Arc::new(InMemoryLaureateStore::with_records(sample_records()));
    let router = connected_router(store).await;

    for endpoint in ENDPOINTS {
        let uri = endpoint.path.replace(":id", "1");
        let response = get(&router, &uri).await;
        assert_eq!(response.status, StatusCode::OK, "GET {} failed", uri);
    }
}

#[tokio::test]
async fn unknown_route_is_a_structured_404() {
    let router = connected_router(Arc::new(InMemoryLaureateStore::new())).await;

    let response = get(&router, "/laureates/name/curie").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "No route for /laureates/name/curie");
}
