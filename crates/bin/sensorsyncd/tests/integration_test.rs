//! End-to-end smoke tests for the full sensorsyncd stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real
//! document store, real service, real axum router) and exercises the HTTP
//! layer via `tower::ServiceExt::oneshot` — no TCP port is bound.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use sensorsync_adapter_http_axum::router;
use sensorsync_adapter_http_axum::state::AppState;
use sensorsync_adapter_storage_sqlite_sqlx::{
    Config, ContainerSpec, Database, SqliteDocumentStore,
};
use sensorsync_app::ports::{DocumentStore, ReadOutcome};
use sensorsync_app::services::ingest_service::IngestService;
use sensorsync_domain::document::{PARTITION_KEY_PATH, SensorDocument};
use serde_json::{Value, json};
use tower::ServiceExt;

fn readings() -> ContainerSpec {
    ContainerSpec {
        database: "SensorDB".to_string(),
        container: "Readings".to_string(),
        partition_key_path: PARTITION_KEY_PATH.to_string(),
    }
}

/// A fully-wired router plus a second handle on the same container for
/// inspecting what was written.
struct TestApp {
    router: axum::Router,
    store: SqliteDocumentStore,
    _db: Database,
}

impl TestApp {
    async fn new() -> Self {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .expect("in-memory database should initialise");

        let store = db.provision(&readings()).await.unwrap();
        let router = router::build(AppState::new(IngestService::new(store)));
        let store = db.provision(&readings()).await.unwrap();

        Self {
            router,
            store,
            _db: db,
        }
    }

    async fn post(&self, body: impl Into<Body>) -> (StatusCode, String) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/update-sensors")
                    .header("content-type", "application/json")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn post_json(&self, payload: &Value) -> (StatusCode, String) {
        self.post(payload.to_string()).await
    }

    async fn document(&self, sensor_id: &str) -> Option<SensorDocument> {
        match self.store.read(sensor_id, sensor_id).await.unwrap() {
            ReadOutcome::Found(stored) => Some(stored.document),
            ReadOutcome::NotFound => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let app = TestApp::new().await;
    let resp = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_store_one_record_per_sensor() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post_json(&json!([
            {"sensorId": "s1", "temp": 20},
            {"sensorId": "s2", "temp": 21},
            {"sensorId": "s1", "humidity": 40}
        ]))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Sensor data processed");

    let s1 = app.document("s1").await.unwrap();
    assert_eq!(s1.id(), Some("s1"));
    assert_eq!(s1.get("temp"), Some(&json!(20)));
    assert_eq!(s1.get("humidity"), Some(&json!(40)));
    assert!(app.document("s2").await.is_some());
}

#[tokio::test]
async fn should_accept_full_batch_of_distinct_sensors() {
    let app = TestApp::new().await;
    let payload: Vec<Value> = (0..100)
        .map(|i| json!({"sensorId": format!("sensor-{i}"), "value": i}))
        .collect();

    let (status, _) = app.post_json(&Value::Array(payload)).await;

    assert_eq!(status, StatusCode::OK);
    for i in [0, 42, 99] {
        let doc = app.document(&format!("sensor-{i}")).await.unwrap();
        assert_eq!(doc.get("value"), Some(&json!(i)));
    }
}

// ---------------------------------------------------------------------------
// Merge policy
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_merge_partial_update() {
    let app = TestApp::new().await;
    app.post_json(&json!([{"sensorId": "s1", "temp": 20, "humidity": 50}]))
        .await;

    let (status, _) = app.post_json(&json!([{"sensorId": "s1", "temp": 25}])).await;

    assert_eq!(status, StatusCode::OK);
    let doc = app.document("s1").await.unwrap();
    assert_eq!(doc.get("temp"), Some(&json!(25)));
    assert_eq!(doc.get("humidity"), Some(&json!(50)));
}

#[tokio::test]
async fn should_ignore_null_on_existing_record() {
    let app = TestApp::new().await;
    app.post_json(&json!([{"sensorId": "s1", "temp": 20}])).await;

    app.post_json(&json!([{"sensorId": "s1", "temp": null}])).await;

    let doc = app.document("s1").await.unwrap();
    assert_eq!(doc.get("temp"), Some(&json!(20)));
}

#[tokio::test]
async fn should_store_null_literally_on_creation() {
    let app = TestApp::new().await;

    app.post_json(&json!([{"sensorId": "s2", "temp": null}])).await;

    let doc = app.document("s2").await.unwrap();
    assert_eq!(doc.get("temp"), Some(&Value::Null));
}

#[tokio::test]
async fn should_keep_created_at_and_advance_updated_at_when_resubmitting() {
    let app = TestApp::new().await;
    let payload = json!([{"sensorId": "s1", "temp": 20, "unit": "C"}]);

    app.post_json(&payload).await;
    let first = app.document("s1").await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    app.post_json(&payload).await;
    let second = app.document("s1").await.unwrap();

    assert_eq!(second.created_at(), first.created_at());
    assert!(second.updated_at() > first.updated_at());
    assert_eq!(second.get("temp"), first.get("temp"));
    assert_eq!(second.get("unit"), first.get("unit"));
}

#[tokio::test]
async fn should_skip_elements_without_sensor_id() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post_json(&json!([
            {"temp": 1},
            {"sensorId": "s1", "temp": 2}
        ]))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Sensor data processed");
    assert_eq!(
        app.document("s1").await.unwrap().get("temp"),
        Some(&json!(2))
    );
}

// ---------------------------------------------------------------------------
// Rejected payloads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_reject_malformed_json() {
    let app = TestApp::new().await;

    let (status, body) = app.post("[{\"sensorId\": \"s1\", ").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid JSON format");
    assert!(app.document("s1").await.is_none());
}

#[tokio::test]
async fn should_reject_empty_array() {
    let app = TestApp::new().await;

    let (status, body) = app.post_json(&json!([])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid payload: Must be a list of 1 to 100 items");
}

#[tokio::test]
async fn should_reject_oversized_batch_and_store_nothing() {
    let app = TestApp::new().await;
    let payload: Vec<Value> = (0..101)
        .map(|i| json!({"sensorId": format!("sensor-{i}")}))
        .collect();

    let (status, body) = app.post_json(&Value::Array(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid payload: Must be a list of 1 to 100 items");
    assert!(app.document("sensor-0").await.is_none());
}

#[tokio::test]
async fn should_reject_single_object_payload() {
    let app = TestApp::new().await;

    let (status, body) = app.post_json(&json!({"sensorId": "s1", "temp": 20})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid payload: Must be a list of 1 to 100 items");
    assert!(app.document("s1").await.is_none());
}
