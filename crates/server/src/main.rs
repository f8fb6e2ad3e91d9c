//! Ops copilot - chat gateway and tool server
//!
//! Serves the fixture lookup tools to an external agent orchestrator and
//! forwards user chat messages to it.

use anyhow::Result;
use copilot_lib::{
    health::{components, HealthRegistry},
    lookup::LookupEngine,
    observability::{CopilotMetrics, StructuredLogger},
    store::{Collection, FixtureStore},
    tools::ToolRouter,
};
use ops_copilot::{
    api,
    config::CopilotConfig,
    orchestrator::HttpOrchestrator,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const COPILOT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting ops-copilot");

    let config = CopilotConfig::load()?;
    info!(
        instance = %config.instance_name,
        data_dir = %config.data_dir.display(),
        "Copilot configured"
    );

    let metrics = CopilotMetrics::new();
    let logger = StructuredLogger::new(&config.instance_name);
    logger.log_startup(COPILOT_VERSION, &config.data_dir.display().to_string());

    // Fixture store and health
    let store = Arc::new(FixtureStore::open(&config.data_dir));
    let health_registry = HealthRegistry::new();
    health_registry.register(components::FIXTURE_STORE).await;
    health_registry.register(components::TEMPLATES).await;
    health_registry.register(components::ORCHESTRATOR).await;
    health_registry.check_store(&store).await;

    metrics.set_fixture_records(
        Collection::Logs.file_name(),
        store.alerts().map(|a| a.len() as i64).unwrap_or(0),
    );
    metrics.set_fixture_records(
        Collection::Configs.file_name(),
        store.configs().map(|c| c.len() as i64).unwrap_or(0),
    );

    let tools = ToolRouter::new(LookupEngine::new(store), metrics.clone(), logger.clone());
    let mut app_state = api::AppState::new(tools, health_registry.clone(), metrics, logger.clone());

    match config.orchestrator_url.as_deref() {
        Some(url) => {
            let orchestrator = HttpOrchestrator::new(
                url,
                Duration::from_secs(config.orchestrator_timeout_secs),
            )?;
            info!(endpoint = %orchestrator.endpoint(), "Chat requests forwarded to orchestrator");
            app_state = app_state.with_orchestrator(Arc::new(orchestrator));
        }
        None => {
            warn!("No orchestrator configured, /chat will answer 503");
            health_registry
                .set_degraded(components::ORCHESTRATOR, "No orchestrator configured")
                .await;
        }
    }

    health_registry.set_ready(true).await;

    let api_handle = tokio::spawn(api::serve(config.api_port, Arc::new(app_state)));

    tokio::signal::ctrl_c().await?;
    logger.log_shutdown("SIGINT received");
    api_handle.abort();
    info!("Shutting down");

    Ok(())
}
