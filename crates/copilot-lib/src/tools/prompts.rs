//! Canned prompt templates

use serde::{Deserialize, Serialize};

pub const ANALYZE_ISSUE: &str = "analyze_issue";
pub const SUGGEST_FIX: &str = "suggest_fix";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptArgument {
    pub name: String,
    pub description: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptDefinition {
    pub name: String,
    pub description: String,
    pub arguments: Vec<PromptArgument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeIssueArgs {
    pub alert_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestFixArgs {
    pub resource_id: String,
    pub issue: String,
}

fn argument(name: &str, description: &str) -> PromptArgument {
    PromptArgument {
        name: name.to_string(),
        description: description.to_string(),
        required: true,
    }
}

pub fn definitions() -> Vec<PromptDefinition> {
    vec![
        PromptDefinition {
            name: ANALYZE_ISSUE.to_string(),
            description: "Create a prompt to analyze an issue based on an alert ID.".to_string(),
            arguments: vec![argument("alert_id", "The ID of the alert to analyze")],
        },
        PromptDefinition {
            name: SUGGEST_FIX.to_string(),
            description: "Create a prompt to suggest a fix for a resource.".to_string(),
            arguments: vec![
                argument("resource_id", "The affected resource"),
                argument("issue", "Short description of the problem"),
            ],
        },
    ]
}

pub fn analyze_issue(args: &AnalyzeIssueArgs) -> String {
    format!(
        "Please analyze the following alert and suggest remediation steps:\n\
         Alert ID: {}\n\
         \n\
         1. Use the 'analyze_alert' tool to get details.\n\
         2. Use the 'get_resource_config' tool to check the resource configuration.\n\
         3. Use the 'generate_fix' tool if a fix is applicable.\n",
        args.alert_id
    )
}

pub fn suggest_fix(args: &SuggestFixArgs) -> String {
    format!(
        "The resource {} is experiencing {}.\n\
         Please generate a fix using the available templates.\n",
        args.resource_id, args.issue
    )
}
