//! Health check infrastructure for the ops copilot
//!
//! Tracks component health for the `/healthz` and `/readyz` endpoints.
//! A broken fixture store degrades the service rather than failing it:
//! tools keep answering, with error text instead of data.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::lookup::{SQL_SCALE_TEMPLATE, VM_RESIZE_TEMPLATE};
use crate::store::FixtureStore;

/// Health status of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is experiencing issues; the copilot keeps answering
    Degraded,
}

/// Information about a component's health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub status: ComponentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub last_check_timestamp: i64,
}

impl ComponentHealth {
    pub fn healthy() -> Self {
        Self::with_status(ComponentStatus::Healthy, None)
    }

    pub fn degraded(message: impl Into<String>) -> Self {
        Self::with_status(ComponentStatus::Degraded, Some(message.into()))
    }

    fn with_status(status: ComponentStatus, message: Option<String>) -> Self {
        Self {
            status,
            message,
            last_check_timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// Overall health response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: ComponentStatus,
    pub components: HashMap<String, ComponentHealth>,
}

impl HealthResponse {
    /// Worst status among the components; healthy when there are none
    pub fn compute_status(components: &HashMap<String, ComponentHealth>) -> ComponentStatus {
        if components
            .values()
            .any(|health| health.status == ComponentStatus::Degraded)
        {
            ComponentStatus::Degraded
        } else {
            ComponentStatus::Healthy
        }
    }
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Component names for health tracking
pub mod components {
    pub const FIXTURE_STORE: &str = "fixture_store";
    pub const TEMPLATES: &str = "templates";
    pub const ORCHESTRATOR: &str = "orchestrator";
}

/// Health registry for tracking component health
#[derive(Debug, Clone)]
pub struct HealthRegistry {
    components: Arc<RwLock<HashMap<String, ComponentHealth>>>,
    ready: Arc<RwLock<bool>>,
}

impl Default for HealthRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthRegistry {
    pub fn new() -> Self {
        Self {
            components: Arc::new(RwLock::new(HashMap::new())),
            ready: Arc::new(RwLock::new(false)),
        }
    }

    /// Register a component with initial healthy status
    pub async fn register(&self, name: &str) {
        self.update(name, ComponentHealth::healthy()).await;
    }

    pub async fn update(&self, name: &str, health: ComponentHealth) {
        let mut components = self.components.write().await;
        components.insert(name.to_string(), health);
    }

    pub async fn set_healthy(&self, name: &str) {
        self.update(name, ComponentHealth::healthy()).await;
    }

    pub async fn set_degraded(&self, name: &str, message: impl Into<String>) {
        self.update(name, ComponentHealth::degraded(message)).await;
    }

    pub async fn set_ready(&self, ready: bool) {
        let mut r = self.ready.write().await;
        *r = ready;
    }

    /// Load both collections and look for the fix templates, recording the
    /// result under [`components::FIXTURE_STORE`] and [`components::TEMPLATES`]
    pub async fn check_store(&self, store: &FixtureStore) {
        let faults: Vec<String> = [
            store.alerts().err(),
            store.configs().err(),
        ]
        .into_iter()
        .flatten()
        .map(|fault| format!("{}: {}", fault.collection(), fault))
        .collect();

        if faults.is_empty() {
            self.set_healthy(components::FIXTURE_STORE).await;
        } else {
            self.set_degraded(components::FIXTURE_STORE, faults.join("; ")).await;
        }

        let missing: Vec<&str> = [VM_RESIZE_TEMPLATE, SQL_SCALE_TEMPLATE]
            .into_iter()
            .filter(|name| !store.has_template(name))
            .collect();

        if missing.is_empty() {
            self.set_healthy(components::TEMPLATES).await;
        } else {
            self.set_degraded(
                components::TEMPLATES,
                format!("Missing templates: {}", missing.join(", ")),
            )
            .await;
        }
    }

    pub async fn health(&self) -> HealthResponse {
        let components = self.components.read().await.clone();
        let status = HealthResponse::compute_status(&components);
        HealthResponse { status, components }
    }

    /// Ready once startup has finished. Degraded components never take
    /// the copilot out of rotation: lookups answer with error text and chat
    /// failures are reported per request.
    pub async fn readiness(&self) -> ReadinessResponse {
        if *self.ready.read().await {
            ReadinessResponse {
                ready: true,
                reason: None,
            }
        } else {
            ReadinessResponse {
                ready: false,
                reason: Some("Copilot not yet initialized".to_string()),
            }
        }
    }
}
