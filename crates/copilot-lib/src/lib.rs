//! Ops copilot library
//!
//! This crate provides the core functionality for:
//! - Loading the read-only alert and resource configuration fixtures
//! - Looking up alerts, resource configurations and fix templates
//! - Exposing those lookups as tools for an external agent runtime
//! - Health checks and observability

pub mod fixtures;
pub mod health;
pub mod lookup;
pub mod models;
pub mod observability;
pub mod store;
pub mod tools;

pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use lookup::{FixText, LookupEngine, LookupError};
pub use models::*;
pub use observability::{CopilotMetrics, StructuredLogger};
pub use store::{Collection, FixtureStore, StoreFault};
pub use tools::{ToolDefinition, ToolError, ToolName, ToolRouter};
