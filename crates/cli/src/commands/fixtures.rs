//! Tabular views of the alert and configuration fixtures

use anyhow::Result;
use copilot_lib::{AlertRecord, AlertStatus, ResourceConfig, Severity};
use tabled::Tabled;

use crate::client::ApiClient;
use crate::output::{color_compliance, color_severity, print_records, short_id, truncate, OutputFormat};

/// Row for alerts table
#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Resource")]
    resource: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Created")]
    created_at: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Row for resource configuration table
#[derive(Tabled)]
struct ConfigRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    resource_type: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Compliance")]
    compliance: String,
}

fn alert_row(alert: &AlertRecord) -> AlertRow {
    let metric = match (&alert.properties.metric_value, &alert.properties.threshold) {
        (Some(value), Some(threshold)) => format!("{} / {}", value, threshold),
        (Some(value), None) => value.to_string(),
        (None, _) => "-".to_string(),
    };

    AlertRow {
        id: alert.id.clone(),
        severity: color_severity(alert.severity),
        resource: short_id(&alert.resource_id).to_string(),
        description: truncate(&alert.description, 40),
        metric,
        created_at: alert.created_at.format("%Y-%m-%d %H:%M").to_string(),
        status: alert.status.to_string(),
    }
}

/// Keep alerts matching the optional severity and status filters
pub fn filter_alerts(
    alerts: Vec<AlertRecord>,
    severity: Option<&str>,
    status: Option<&str>,
) -> Vec<AlertRecord> {
    alerts
        .into_iter()
        .filter(|a| {
            severity
                .map(|s| a.severity.to_string().eq_ignore_ascii_case(s))
                .unwrap_or(true)
        })
        .filter(|a| {
            status
                .map(|s| a.status.to_string().eq_ignore_ascii_case(s))
                .unwrap_or(true)
        })
        .collect()
}

/// List alerts, newest first
pub async fn list_alerts(
    client: &ApiClient,
    severity: Option<String>,
    status: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let alerts: Vec<AlertRecord> = client.get("api/v1/alerts").await?;
    let mut alerts = filter_alerts(alerts, severity.as_deref(), status.as_deref());
    alerts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    print_records(
        &alerts,
        |alerts| alerts.iter().map(alert_row).collect(),
        "alerts",
        format,
    )?;

    if matches!(format, OutputFormat::Table) {
        let critical = alerts
            .iter()
            .filter(|a| a.severity == Severity::Critical)
            .count();
        let open = alerts
            .iter()
            .filter(|a| a.status != AlertStatus::Closed)
            .count();
        if !alerts.is_empty() {
            println!("Critical: {}, open: {}", critical, open);
        }
    }

    Ok(())
}

/// List resource configurations
pub async fn list_configs(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let configs: Vec<ResourceConfig> = client.get("api/v1/configs").await?;

    print_records(
        &configs,
        |configs| {
            configs
                .iter()
                .map(|c| ConfigRow {
                    name: c.short_name().to_string(),
                    resource_type: c.resource_type.clone(),
                    location: c.location.clone(),
                    compliance: color_compliance(c.compliance_status),
                })
                .collect()
        },
        "resources",
        format,
    )
}
