//! Tool catalogue command

use anyhow::Result;
use copilot_lib::ToolDefinition;
use tabled::Tabled;

use crate::client::ApiClient;
use crate::output::{print_records, OutputFormat};

#[derive(Tabled)]
struct ToolRow {
    #[tabled(rename = "Tool")]
    name: String,
    #[tabled(rename = "Arguments")]
    arguments: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Argument names declared by a tool's input schema
fn argument_names(tool: &ToolDefinition) -> String {
    let names: Vec<&str> = tool
        .input_schema
        .get("properties")
        .and_then(|p| p.as_object())
        .map(|props| props.keys().map(String::as_str).collect())
        .unwrap_or_default();

    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(", ")
    }
}

pub async fn list_tools(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let tools: Vec<ToolDefinition> = client.get("api/v1/tools").await?;

    print_records(
        &tools,
        |tools| {
            tools
                .iter()
                .map(|t| ToolRow {
                    name: t.name.clone(),
                    arguments: argument_names(t),
                    description: t.description.clone(),
                })
                .collect()
        },
        "tools",
        format,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use copilot_lib::ToolName;

    #[test]
    fn test_argument_names_follow_schema_order() {
        assert_eq!(
            argument_names(&ToolName::GenerateFix.definition()),
            "issue_type, resource_type"
        );
        assert_eq!(argument_names(&ToolName::GetAllLogs.definition()), "-");
    }
}
