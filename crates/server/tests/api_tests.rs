//! Integration tests for the copilot API endpoints

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use copilot_lib::{
    fixtures,
    health::{components, HealthRegistry},
    lookup::LookupEngine,
    observability::{CopilotMetrics, StructuredLogger},
    store::FixtureStore,
    tools::ToolRouter,
};
use ops_copilot::{
    api::{create_router, AppState},
    orchestrator::Orchestrator,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

struct EchoOrchestrator;

#[async_trait]
impl Orchestrator for EchoOrchestrator {
    async fn respond(&self, message: &str) -> anyhow::Result<String> {
        Ok(format!("You asked: {message}"))
    }
}

struct FailingOrchestrator;

#[async_trait]
impl Orchestrator for FailingOrchestrator {
    async fn respond(&self, _message: &str) -> anyhow::Result<String> {
        anyhow::bail!("model deployment not found")
    }
}

async fn setup_state(dir: &TempDir) -> AppState {
    let store = Arc::new(FixtureStore::open(dir.path()));
    let health_registry = HealthRegistry::new();
    health_registry.register(components::ORCHESTRATOR).await;
    health_registry.check_store(&store).await;

    let metrics = CopilotMetrics::new();
    let logger = StructuredLogger::new("test-copilot");
    let tools = ToolRouter::new(LookupEngine::new(store), metrics.clone(), logger.clone());

    AppState::new(tools, health_registry, metrics, logger)
}

async fn setup_test_app() -> (TempDir, Router, Arc<AppState>) {
    let dir = TempDir::new().unwrap();
    fixtures::write_fixtures(dir.path(), 10, chrono::Utc::now()).unwrap();

    let state = Arc::new(
        setup_state(&dir)
            .await
            .with_orchestrator(Arc::new(EchoOrchestrator)),
    );
    let router = create_router(state.clone());

    (dir, router, state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_returns_static_payload() {
    let (_dir, app, _state) = setup_test_app().await;

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_chat_forwards_to_orchestrator() {
    let (_dir, app, _state) = setup_test_app().await;

    let response = app
        .oneshot(post_json("/chat", json!({ "message": "What is wrong with vm-01?" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "response": "You asked: What is wrong with vm-01?" })
    );
}

#[tokio::test]
async fn test_chat_failure_returns_500_with_detail() {
    let dir = TempDir::new().unwrap();
    let state = Arc::new(
        setup_state(&dir)
            .await
            .with_orchestrator(Arc::new(FailingOrchestrator)),
    );
    let app = create_router(state);

    let response = app
        .oneshot(post_json("/chat", json!({ "message": "hi" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["detail"], "model deployment not found");
}

#[tokio::test]
async fn test_chat_failure_degrades_orchestrator_until_next_success() {
    let dir = TempDir::new().unwrap();
    let failing = Arc::new(
        setup_state(&dir)
            .await
            .with_orchestrator(Arc::new(FailingOrchestrator)),
    );
    failing.health_registry.set_ready(true).await;
    let app = create_router(failing.clone());

    let response = app
        .clone()
        .oneshot(post_json("/chat", json!({ "message": "hi" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = app.clone().oneshot(get("/healthz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let health = body_json(response).await;
    assert_eq!(health["components"]["orchestrator"]["status"], "degraded");
    assert_eq!(
        health["components"]["orchestrator"]["message"],
        "model deployment not found"
    );

    // Still in rotation: tools keep working
    let response = app.oneshot(get("/readyz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // A healthy orchestrator sharing the registry clears the mark
    let recovered = Arc::new(
        AppState::new(
            failing.tools.clone(),
            failing.health_registry.clone(),
            failing.metrics.clone(),
            failing.logger.clone(),
        )
        .with_orchestrator(Arc::new(EchoOrchestrator)),
    );
    let app = create_router(recovered);
    let response = app
        .clone()
        .oneshot(post_json("/chat", json!({ "message": "hi" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let health = body_json(app.oneshot(get("/healthz")).await.unwrap()).await;
    assert_eq!(health["components"]["orchestrator"]["status"], "healthy");
}

#[tokio::test]
async fn test_chat_without_orchestrator_returns_503() {
    let dir = TempDir::new().unwrap();
    let app = create_router(Arc::new(setup_state(&dir).await));

    let response = app
        .oneshot(post_json("/chat", json!({ "message": "hi" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_list_tools_includes_schemas() {
    let (_dir, app, _state) = setup_test_app().await;

    let response = app.oneshot(get("/api/v1/tools")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let tools = body_json(response).await;
    let tools = tools.as_array().unwrap();
    assert_eq!(tools.len(), 6);

    let analyze = tools.iter().find(|t| t["name"] == "analyze_alert").unwrap();
    assert_eq!(
        analyze["input_schema"]["properties"]["alert_id"]["type"],
        "string"
    );
}

#[tokio::test]
async fn test_call_tool_analyze_alert() {
    let (_dir, app, _state) = setup_test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/v1/tools/analyze_alert",
            json!({ "arguments": { "alert_id": "alert-003" } }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "analyze_alert");
    let content = body["content"].as_str().unwrap();
    assert!(content.contains("ID: alert-003"));
    assert!(content.contains("Severity: Warning"));
}

#[tokio::test]
async fn test_call_tool_not_found_is_still_200() {
    let (_dir, app, _state) = setup_test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/v1/tools/get_resource_config",
            json!({ "arguments": { "resource_id": "vm-99" } }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["content"],
        "Error: Resource vm-99 not found."
    );
}

#[tokio::test]
async fn test_call_listing_tool_without_body() {
    let (_dir, app, _state) = setup_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/tools/get_all_resource_configs")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content = body_json(response).await["content"]
        .as_str()
        .unwrap()
        .to_string();
    let configs: Vec<Value> = serde_json::from_str(&content).unwrap();
    assert_eq!(configs.len(), 3);
}

#[tokio::test]
async fn test_unknown_tool_returns_404() {
    let (_dir, app, _state) = setup_test_app().await;

    let response = app
        .oneshot(post_json("/api/v1/tools/restart_vm", json!({ "arguments": {} })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["detail"], "Unknown tool: restart_vm");
}

#[tokio::test]
async fn test_missing_argument_returns_400() {
    let (_dir, app, _state) = setup_test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/v1/tools/generate_fix",
            json!({ "arguments": { "issue_type": "High CPU" } }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_read_resource_returns_raw_file() {
    let (dir, app, _state) = setup_test_app().await;

    let response = app
        .oneshot(get("/api/v1/resources/read?uri=azure://logs/recent"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(
        String::from_utf8(body.to_vec()).unwrap(),
        std::fs::read_to_string(dir.path().join("logs.json")).unwrap()
    );
}

#[tokio::test]
async fn test_render_prompt() {
    let (_dir, app, _state) = setup_test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/v1/prompts/suggest_fix",
            json!({ "arguments": { "resource_id": "db-01", "issue": "DTU saturation" } }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content = body_json(response).await["content"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(content.starts_with("The resource db-01 is experiencing DTU saturation."));
}

#[tokio::test]
async fn test_alert_and_config_collections() {
    let (_dir, app, _state) = setup_test_app().await;

    let alerts = body_json(app.clone().oneshot(get("/api/v1/alerts")).await.unwrap()).await;
    assert_eq!(alerts.as_array().unwrap().len(), 10);
    assert_eq!(alerts[0]["id"], "alert-001");

    let configs = body_json(app.oneshot(get("/api/v1/configs")).await.unwrap()).await;
    assert_eq!(configs[1]["compliance_status"], "NonCompliant");
}

#[tokio::test]
async fn test_healthz_degraded_when_store_missing() {
    let dir = TempDir::new().unwrap();
    let state = Arc::new(setup_state(&dir).await);
    let app = create_router(state);

    let response = app.oneshot(get("/healthz")).await.unwrap();

    // Degraded still returns 200
    assert_eq!(response.status(), StatusCode::OK);
    let health = body_json(response).await;
    assert_eq!(health["status"], "degraded");
    assert_eq!(health["components"]["fixture_store"]["status"], "degraded");
}

#[tokio::test]
async fn test_readyz_follows_registry() {
    let (_dir, app, state) = setup_test_app().await;

    let response = app.clone().oneshot(get("/readyz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    state.health_registry.set_ready(true).await;
    let response = app.oneshot(get("/readyz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["ready"], true);
}

#[tokio::test]
async fn test_metrics_count_tool_calls() {
    let (_dir, app, _state) = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/tools/generate_fix",
            json!({ "arguments": { "issue_type": "disk full", "resource_type": "storage" } }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response.headers().get("content-type").unwrap();
    assert!(content_type.to_str().unwrap().contains("text/plain"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let metrics_text = String::from_utf8(body.to_vec()).unwrap();

    assert!(metrics_text.contains("ops_copilot_tool_invocations_total"));
    assert!(metrics_text.contains("outcome=\"no_template\""));
    assert!(metrics_text.contains("ops_copilot_tool_latency_seconds_bucket"));
}
