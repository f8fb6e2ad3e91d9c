//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use copilot_lib::{ComplianceStatus, Severity};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print rows as a table, or the underlying records as JSON
pub fn print_records<T: Serialize, R: Tabled>(
    records: &[T],
    rows: impl FnOnce(&[T]) -> Vec<R>,
    noun: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(records)?);
        }
        OutputFormat::Table => {
            if records.is_empty() {
                print_warning(&format!("No {} found", noun));
                return Ok(());
            }
            let table = Table::new(rows(records)).with(Style::rounded()).to_string();
            println!("{}", table);
            println!("\nTotal: {} {}", records.len(), noun);
        }
    }
    Ok(())
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Final path segment of a resource identifier
pub fn short_id(resource_id: &str) -> &str {
    resource_id.rsplit('/').next().unwrap_or(resource_id)
}

/// Shorten long free text for table cells
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", head)
}

pub fn color_severity(severity: Severity) -> String {
    match severity {
        Severity::Critical => severity.to_string().red().bold().to_string(),
        Severity::Warning => severity.to_string().yellow().to_string(),
    }
}

pub fn color_compliance(status: ComplianceStatus) -> String {
    match status {
        ComplianceStatus::Compliant => status.to_string().green().to_string(),
        ComplianceStatus::NonCompliant => status.to_string().red().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id() {
        assert_eq!(
            short_id("/subscriptions/sub-1/resourceGroups/rg-1/providers/Microsoft.Web/sites/app-01"),
            "app-01"
        );
        assert_eq!(short_id("vm-01"), "vm-01");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Disk space low", 40), "Disk space low");
        assert_eq!(truncate("App Service response time high", 12), "App Service…");
    }
}
