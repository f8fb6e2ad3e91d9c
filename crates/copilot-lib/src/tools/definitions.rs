//! Tool names, argument types and advertised definitions

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Every tool the router answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    AnalyzeAlert,
    GetResourceConfig,
    GenerateFix,
    GetAllLogs,
    GetAllResourceConfigs,
    IntegrationPlaceholder,
}

impl ToolName {
    pub const ALL: [ToolName; 6] = [
        ToolName::AnalyzeAlert,
        ToolName::GetResourceConfig,
        ToolName::GenerateFix,
        ToolName::GetAllLogs,
        ToolName::GetAllResourceConfigs,
        ToolName::IntegrationPlaceholder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::AnalyzeAlert => "analyze_alert",
            ToolName::GetResourceConfig => "get_resource_config",
            ToolName::GenerateFix => "generate_fix",
            ToolName::GetAllLogs => "get_all_logs",
            ToolName::GetAllResourceConfigs => "get_all_resource_configs",
            ToolName::IntegrationPlaceholder => "integration_placeholder",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.as_str() == name)
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolName::AnalyzeAlert => {
                "Analyze an Azure Monitor alert by ID. Returns the alert details and potential root cause."
            }
            ToolName::GetResourceConfig => {
                "Get the configuration of an Azure resource. Accepts a full resource ID or a short name such as 'vm-01'."
            }
            ToolName::GenerateFix => {
                "Generate a fix for a specific issue type and resource type. Returns a Bicep or CLI snippet."
            }
            ToolName::GetAllLogs => "List every Azure Monitor alert in the fixture store.",
            ToolName::GetAllResourceConfigs => {
                "List every Azure resource configuration in the fixture store."
            }
            ToolName::IntegrationPlaceholder => {
                "Placeholder for future integrations (e.g., Jira, ServiceNow)."
            }
        }
    }

    fn input_schema(&self) -> serde_json::Value {
        let schema = match self {
            ToolName::AnalyzeAlert => schemars::schema_for!(AnalyzeAlertArgs),
            ToolName::GetResourceConfig => schemars::schema_for!(GetResourceConfigArgs),
            ToolName::GenerateFix => schemars::schema_for!(GenerateFixArgs),
            ToolName::GetAllLogs | ToolName::GetAllResourceConfigs => {
                schemars::schema_for!(NoArgs)
            }
            ToolName::IntegrationPlaceholder => schemars::schema_for!(IntegrationPlaceholderArgs),
        };

        serde_json::to_value(schema).unwrap_or_default()
    }

    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.as_str().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advertised tool: name, description and JSON schema of its arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AnalyzeAlertArgs {
    /// The ID of the alert to analyze, e.g. 'alert-001'
    pub alert_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetResourceConfigArgs {
    /// Full resource ID or short name of the resource
    pub resource_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GenerateFixArgs {
    /// The type of issue (e.g., 'High CPU')
    pub issue_type: String,
    /// The type of resource (e.g., 'Microsoft.Compute/virtualMachines')
    pub resource_type: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct IntegrationPlaceholderArgs {
    /// External service to integrate with
    pub service_name: String,
    /// Action to perform on that service
    pub action: String,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoArgs {}
