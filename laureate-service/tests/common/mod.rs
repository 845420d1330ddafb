#![allow(dead_code)]

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use laureate_service::config::{HeartbeatConfig, LaureateConfig, MongoConfig, SeedConfig};
use laureate_service::models::LaureateRecord;
use laureate_service::services::{ConnectionMonitor, InMemoryLaureateStore, LaureateStore};
use laureate_service::startup::Application;
use laureate_service::{build_router, AppState};
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

pub fn record(id: i64, name: &str, year: i32, category: &str) -> LaureateRecord {
    LaureateRecord {
        id,
        name: name.to_string(),
        year,
        country: "Sweden".to_string(),
        category: category.to_string(),
        description: format!("{} laureate in {}", category, year),
    }
}

pub fn sample_records() -> Vec<LaureateRecord> {
    vec![
        record(1, "Selma Lagerlöf", 1909, "Literature"),
        record(2, "Alva Myrdal", 1982, "Peace"),
        record(3, "Nelly Sachs", 1966, "Literature"),
    ]
}

pub fn test_config(reset: bool) -> LaureateConfig {
    LaureateConfig {
        common: CoreConfig {
            port: 0,
            ..CoreConfig::default()
        },
        mongodb: MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "laureates_test".to_string(),
        },
        seed: SeedConfig {
            reset,
            dataset_path: None,
        },
        heartbeat: HeartbeatConfig {
            interval_seconds: 1,
            ping_timeout_ms: 500,
        },
    }
}

/// Router over an in-memory store whose connection has already been observed.
pub async fn connected_router(store: Arc<InMemoryLaureateStore>) -> Router {
    let monitor = ConnectionMonitor::new(Duration::from_millis(500));
    monitor.refresh(&*store).await;
    build_router(AppState::new(store, monitor))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

pub async fn get(router: &Router, uri: &str) -> TestResponse {
    get_with_headers(router, uri, &[]).await
}

pub async fn get_with_headers(
    router: &Router,
    uri: &str,
    headers: &[(&str, &str)],
) -> TestResponse {
    let mut builder = Request::builder().uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }

    let response = router
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into()))
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

/// A server bound to a random port, backed by the given store.
pub struct TestApp {
    pub address: String,
    pub store: Arc<dyn LaureateStore>,
}

impl TestApp {
    pub async fn spawn(config: LaureateConfig, store: Arc<dyn LaureateStore>) -> Self {
        let app = Application::build_with_store(config, store.clone())
            .await
            .expect("Failed to build test application");
        let address = format!("http://127.0.0.1:{}", app.port());
        let connection = app.state().connection.clone();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the first heartbeat to open the readiness gate
        for _ in 0..100 {
            if connection.is_connected() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        TestApp { address, store }
    }
}
