//! Chat and single-tool commands

use anyhow::Result;
use serde_json::json;

use crate::client::{ApiClient, ChatRequest, ChatResponse};
use crate::output::{print_info, OutputFormat};

/// Send a free-text question through the orchestrator
pub async fn chat(client: &ApiClient, message: &str, format: OutputFormat) -> Result<()> {
    let response: ChatResponse = client
        .post(
            "chat",
            &ChatRequest {
                message: message.to_string(),
            },
        )
        .await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
        OutputFormat::Table => println!("{}", response.response),
    }

    Ok(())
}

/// Summarize one alert
pub async fn analyze(client: &ApiClient, alert_id: &str, format: OutputFormat) -> Result<()> {
    let content = client
        .call_tool("analyze_alert", json!({ "alert_id": alert_id }))
        .await?;
    print_content("analyze_alert", &content, format)
}

/// Show the configuration of one resource, by full id or short name
pub async fn config(client: &ApiClient, resource_id: &str, format: OutputFormat) -> Result<()> {
    let content = client
        .call_tool("get_resource_config", json!({ "resource_id": resource_id }))
        .await?;
    print_content("get_resource_config", &content, format)
}

/// Print the remediation template for an issue
pub async fn fix(
    client: &ApiClient,
    issue_type: &str,
    resource_type: &str,
    format: OutputFormat,
) -> Result<()> {
    let content = client
        .call_tool(
            "generate_fix",
            json!({ "issue_type": issue_type, "resource_type": resource_type }),
        )
        .await?;

    if matches!(format, OutputFormat::Table) {
        print_info(&format!("Fix for '{}' on '{}':", issue_type, resource_type));
        println!();
    }
    print_content("generate_fix", &content, format)
}

fn print_content(tool: &str, content: &str, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let body = json!({ "name": tool, "content": content });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Table => println!("{}", content),
    }
    Ok(())
}
