//! Tool surface for the external agent runtime
//!
//! Exposes the lookup engine as named, schema-described tools returning
//! plain text, plus two raw JSON resources and two prompt templates.
//!
//! Lookup failures (missing store, unknown id) are answers, not errors: they
//! come back as descriptive text. [`ToolError`] is reserved for calls that
//! cannot be dispatched at all.

mod definitions;
pub mod prompts;
pub mod resources;

pub use definitions::{
    AnalyzeAlertArgs, GenerateFixArgs, GetResourceConfigArgs, IntegrationPlaceholderArgs, NoArgs,
    ToolDefinition, ToolName,
};
pub use prompts::PromptDefinition;
pub use resources::{ResourceDefinition, ALL_CONFIGS_URI, RECENT_LOGS_URI};

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Instant;
use thiserror::Error;

use crate::lookup::{FixText, LookupEngine, LookupError};
use crate::observability::{CopilotMetrics, StructuredLogger};
use crate::store::StoreFault;

/// Call that could not be dispatched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {target}: {reason}")]
    InvalidArguments { target: String, reason: String },

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("Unknown prompt: {0}")]
    UnknownPrompt(String),
}

/// How a tool call turned out, used as a metrics label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOutcome {
    Success,
    NoTemplate,
    NotFound,
    StoreUnavailable,
    Rejected,
}

impl ToolOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolOutcome::Success => "success",
            ToolOutcome::NoTemplate => "no_template",
            ToolOutcome::NotFound => "not_found",
            ToolOutcome::StoreUnavailable => "store_unavailable",
            ToolOutcome::Rejected => "rejected",
        }
    }

    fn of_lookup(err: &LookupError) -> Self {
        match err {
            LookupError::StoreUnavailable(_) => ToolOutcome::StoreUnavailable,
            LookupError::NotFound { .. } => ToolOutcome::NotFound,
        }
    }
}

/// Render a failed alert lookup the way the tool reports it
pub fn render_alert_error(err: &LookupError) -> String {
    match err {
        LookupError::StoreUnavailable(StoreFault::Unreadable { detail, .. }) => {
            format!("Error analyzing alert: {detail}")
        }
        other => format!("Error: {other}"),
    }
}

/// Render a failed resource lookup the way the tool reports it
pub fn render_config_error(err: &LookupError) -> String {
    match err {
        LookupError::StoreUnavailable(StoreFault::Unreadable { detail, .. }) => {
            format!("Error reading config: {detail}")
        }
        other => format!("Error: {other}"),
    }
}

fn pretty_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "[]".to_string())
}

fn decode<T: DeserializeOwned>(target: &str, arguments: Value) -> Result<T, ToolError> {
    let arguments = match arguments {
        Value::Null => Value::Object(serde_json::Map::new()),
        other => other,
    };

    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments {
        target: target.to_string(),
        reason: e.to_string(),
    })
}

/// Dispatches tool calls, resource reads and prompt renders.
///
/// Stateless apart from the shared engine; every call is idempotent.
#[derive(Clone)]
pub struct ToolRouter {
    engine: LookupEngine,
    metrics: CopilotMetrics,
    logger: StructuredLogger,
}

impl ToolRouter {
    pub fn new(engine: LookupEngine, metrics: CopilotMetrics, logger: StructuredLogger) -> Self {
        Self {
            engine,
            metrics,
            logger,
        }
    }

    pub fn engine(&self) -> &LookupEngine {
        &self.engine
    }

    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        ToolName::ALL.iter().map(ToolName::definition).collect()
    }

    /// Invoke a tool by name with a JSON object of arguments
    pub fn call_tool(&self, name: &str, arguments: Value) -> Result<String, ToolError> {
        let started = Instant::now();
        let tool = ToolName::parse(name);

        let result = match tool {
            Some(tool) => self.dispatch(tool, arguments),
            None => Err(ToolError::UnknownTool(name.to_string())),
        };

        let outcome = match &result {
            Ok((_, outcome)) => *outcome,
            Err(_) => ToolOutcome::Rejected,
        };
        let label = tool.map(|t| t.as_str()).unwrap_or("unknown");
        let elapsed = started.elapsed().as_secs_f64();

        self.metrics.observe_tool_call(label, outcome.as_str(), elapsed);
        self.logger.log_tool_call(label, outcome.as_str(), elapsed * 1000.0);

        result.map(|(text, _)| text)
    }

    fn dispatch(&self, tool: ToolName, arguments: Value) -> Result<(String, ToolOutcome), ToolError> {
        let target = tool.as_str();

        let answer = match tool {
            ToolName::AnalyzeAlert => {
                let args: AnalyzeAlertArgs = decode(target, arguments)?;
                match self.engine.resolve_alert(&args.alert_id) {
                    Ok(summary) => (summary.to_string(), ToolOutcome::Success),
                    Err(e) => (render_alert_error(&e), ToolOutcome::of_lookup(&e)),
                }
            }
            ToolName::GetResourceConfig => {
                let args: GetResourceConfigArgs = decode(target, arguments)?;
                match self.engine.resolve_resource_config(&args.resource_id) {
                    Ok(config) => (pretty_json(&config), ToolOutcome::Success),
                    Err(e) => (render_config_error(&e), ToolOutcome::of_lookup(&e)),
                }
            }
            ToolName::GenerateFix => {
                let args: GenerateFixArgs = decode(target, arguments)?;
                match self.engine.generate_fix(&args.issue_type, &args.resource_type) {
                    FixText::Template { content, .. } => (content, ToolOutcome::Success),
                    FixText::NoTemplate => (FixText::NoTemplate.to_string(), ToolOutcome::NoTemplate),
                }
            }
            ToolName::GetAllLogs => {
                let _: NoArgs = decode(target, arguments)?;
                (pretty_json(&self.engine.list_all_alerts()), ToolOutcome::Success)
            }
            ToolName::GetAllResourceConfigs => {
                let _: NoArgs = decode(target, arguments)?;
                (
                    pretty_json(&self.engine.list_all_resource_configs()),
                    ToolOutcome::Success,
                )
            }
            ToolName::IntegrationPlaceholder => {
                let args: IntegrationPlaceholderArgs = decode(target, arguments)?;
                (
                    format!(
                        "Integration with {} for action '{}' is not yet implemented.",
                        args.service_name, args.action
                    ),
                    ToolOutcome::Success,
                )
            }
        };

        Ok(answer)
    }

    pub fn list_resources(&self) -> Vec<ResourceDefinition> {
        resources::definitions()
    }

    /// Raw file text behind a resource URI, `[]` when the file is absent
    pub fn read_resource(&self, uri: &str) -> Result<String, ToolError> {
        let collection = resources::collection_for(uri)
            .ok_or_else(|| ToolError::UnknownResource(uri.to_string()))?;

        Ok(self
            .engine
            .store()
            .read_raw(collection)
            .unwrap_or_else(|| "[]".to_string()))
    }

    pub fn list_prompts(&self) -> Vec<PromptDefinition> {
        prompts::definitions()
    }

    /// Render a prompt template with caller-supplied values
    pub fn get_prompt(&self, name: &str, arguments: Value) -> Result<String, ToolError> {
        match name {
            prompts::ANALYZE_ISSUE => Ok(prompts::analyze_issue(&decode(name, arguments)?)),
            prompts::SUGGEST_FIX => Ok(prompts::suggest_fix(&decode(name, arguments)?)),
            _ => Err(ToolError::UnknownPrompt(name.to_string())),
        }
    }
}
