//! HTTP API: chat gateway, tool surface, health checks and Prometheus metrics

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use copilot_lib::{
    health::{components, HealthRegistry, HealthResponse},
    observability::{CopilotMetrics, StructuredLogger},
    tools::{PromptDefinition, ResourceDefinition},
    AlertRecord, ResourceConfig, ToolDefinition, ToolError, ToolRouter,
};
use prometheus::{Encoder, TextEncoder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

use crate::orchestrator::{ChatRequest, ChatResponse, Orchestrator};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub tools: ToolRouter,
    pub health_registry: HealthRegistry,
    pub metrics: CopilotMetrics,
    pub logger: StructuredLogger,
    pub orchestrator: Option<Arc<dyn Orchestrator>>,
}

impl AppState {
    pub fn new(
        tools: ToolRouter,
        health_registry: HealthRegistry,
        metrics: CopilotMetrics,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            tools,
            health_registry,
            metrics,
            logger,
            orchestrator: None,
        }
    }

    pub fn with_orchestrator(mut self, orchestrator: Arc<dyn Orchestrator>) -> Self {
        self.orchestrator = Some(orchestrator);
        self
    }
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Handler error carrying a status code and a message
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl From<ToolError> for ApiError {
    fn from(err: ToolError) -> Self {
        let status = match err {
            ToolError::UnknownTool(_) | ToolError::UnknownResource(_) | ToolError::UnknownPrompt(_) => {
                StatusCode::NOT_FOUND
            }
            ToolError::InvalidArguments { .. } => StatusCode::BAD_REQUEST,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}

/// Body of a tool or prompt invocation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvokeRequest {
    #[serde(default)]
    pub arguments: Value,
}

/// Plain-text result of a tool or prompt invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeResponse {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ResourceQuery {
    pub uri: String,
}

/// Forward a chat message to the orchestrator
async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Some(orchestrator) = state.orchestrator.as_ref() else {
        state.metrics.inc_chat_requests("unconfigured");
        return Err(ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "No orchestrator configured",
        ));
    };

    info!(message = %request.message, "Received chat request");

    match orchestrator.respond(&request.message).await {
        Ok(response) => {
            state
                .health_registry
                .set_healthy(components::ORCHESTRATOR)
                .await;
            state.metrics.inc_chat_requests("success");
            state.logger.log_chat(request.message.chars().count(), true);
            Ok(Json(ChatResponse { response }))
        }
        Err(e) => {
            error!(error = %e, "Error processing chat request");
            state
                .health_registry
                .set_degraded(components::ORCHESTRATOR, e.to_string())
                .await;
            state.metrics.inc_chat_requests("error");
            state.logger.log_chat(request.message.chars().count(), false);
            Err(ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

/// Static liveness payload
async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Component health - always 200, degraded components are reported in the body
async fn healthz(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(state.health_registry.health().await)
}

/// Readiness - 200 if ready, 503 if not
async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

/// Prometheus metrics endpoint
async fn metrics() -> Result<impl IntoResponse, ApiError> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        buffer,
    ))
}

async fn list_tools(State(state): State<Arc<AppState>>) -> Json<Vec<ToolDefinition>> {
    Json(state.tools.list_tools())
}

async fn call_tool(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    request: Option<Json<InvokeRequest>>,
) -> Result<Json<InvokeResponse>, ApiError> {
    let arguments = request.map(|Json(r)| r.arguments).unwrap_or_default();
    let content = state.tools.call_tool(&name, arguments)?;
    Ok(Json(InvokeResponse { name, content }))
}

async fn list_resources(State(state): State<Arc<AppState>>) -> Json<Vec<ResourceDefinition>> {
    Json(state.tools.list_resources())
}

async fn read_resource(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResourceQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let content = state.tools.read_resource(&query.uri)?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        content,
    ))
}

async fn list_prompts(State(state): State<Arc<AppState>>) -> Json<Vec<PromptDefinition>> {
    Json(state.tools.list_prompts())
}

async fn get_prompt(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    request: Option<Json<InvokeRequest>>,
) -> Result<Json<InvokeResponse>, ApiError> {
    let arguments = request.map(|Json(r)| r.arguments).unwrap_or_default();
    let content = state.tools.get_prompt(&name, arguments)?;
    Ok(Json(InvokeResponse { name, content }))
}

/// Alert collection for tabular views
async fn list_alerts(State(state): State<Arc<AppState>>) -> Json<Vec<AlertRecord>> {
    Json(state.tools.engine().list_all_alerts())
}

/// Resource configuration collection for tabular views
async fn list_configs(State(state): State<Arc<AppState>>) -> Json<Vec<ResourceConfig>> {
    Json(state.tools.engine().list_all_resource_configs())
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/health", get(health))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .route("/api/v1/tools", get(list_tools))
        .route("/api/v1/tools/:name", post(call_tool))
        .route("/api/v1/resources", get(list_resources))
        .route("/api/v1/resources/read", get(read_resource))
        .route("/api/v1/prompts", get(list_prompts))
        .route("/api/v1/prompts/:name", post(get_prompt))
        .route("/api/v1/alerts", get(list_alerts))
        .route("/api/v1/configs", get(list_configs))
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
