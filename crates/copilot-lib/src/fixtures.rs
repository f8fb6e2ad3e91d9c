//! Offline fixture generation
//!
//! Produces the synthetic Azure data set the store serves: three resource
//! configurations, a batch of alerts against them and the two fix templates.
//! Output is deterministic for a given `count` and reference time.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use std::path::Path;
use tracing::info;

use crate::lookup::{SQL_SCALE_TEMPLATE, VM_RESIZE_TEMPLATE};
use crate::models::{
    AlertProperties, AlertRecord, AlertStatus, ComplianceStatus, ResourceConfig, Severity,
};
use crate::store::{CONFIGS_FILE, LOGS_FILE, TEMPLATES_DIR};

pub const VM_RESOURCE_ID: &str =
    "/subscriptions/sub-1/resourceGroups/rg-1/providers/Microsoft.Compute/virtualMachines/vm-01";
pub const SQL_RESOURCE_ID: &str =
    "/subscriptions/sub-1/resourceGroups/rg-1/providers/Microsoft.Sql/servers/sql-01/databases/db-01";
pub const WEB_RESOURCE_ID: &str =
    "/subscriptions/sub-1/resourceGroups/rg-1/providers/Microsoft.Web/sites/app-01";

/// Alert threshold shared by every generated alert
pub const METRIC_THRESHOLD: u64 = 80;

/// Alert descriptions paired with the resource they fire on
const ALERT_KINDS: &[(&str, &str)] = &[
    ("High CPU usage detected (95%)", VM_RESOURCE_ID),
    ("Disk space low (5% remaining)", VM_RESOURCE_ID),
    ("SQL Database DTU usage high (90%)", SQL_RESOURCE_ID),
    ("App Service response time high (>2s)", WEB_RESOURCE_ID),
];

const VM_RESIZE_BICEP: &str = include_str!("../../../data/templates/vm_resize.bicep");
const SQL_SCALE_SCRIPT: &str = include_str!("../../../data/templates/sql_scale.sh");

/// The canonical resource configurations
pub fn resource_configs() -> Vec<ResourceConfig> {
    vec![
        ResourceConfig {
            resource_id: VM_RESOURCE_ID.to_string(),
            resource_type: "Microsoft.Compute/virtualMachines".to_string(),
            location: "eastus".to_string(),
            properties: json!({
                "hardwareProfile": { "vmSize": "Standard_D2s_v3" },
                "storageProfile": { "osDisk": { "osType": "Linux", "diskSizeGB": 30 } }
            }),
            compliance_status: ComplianceStatus::Compliant,
            extra: Default::default(),
        },
        ResourceConfig {
            resource_id: SQL_RESOURCE_ID.to_string(),
            resource_type: "Microsoft.Sql/servers/databases".to_string(),
            location: "eastus".to_string(),
            properties: json!({
                "sku": { "name": "Standard", "tier": "Standard", "capacity": 10 },
                "maxSizeBytes": 2147483648u64
            }),
            compliance_status: ComplianceStatus::NonCompliant,
            extra: Default::default(),
        },
        ResourceConfig {
            resource_id: WEB_RESOURCE_ID.to_string(),
            resource_type: "Microsoft.Web/sites".to_string(),
            location: "eastus".to_string(),
            properties: json!({
                "serverFarmId": "/subscriptions/sub-1/resourceGroups/rg-1/providers/Microsoft.Web/serverfarms/plan-01",
                "httpsOnly": false
            }),
            compliance_status: ComplianceStatus::NonCompliant,
            extra: Default::default(),
        },
    ]
}

/// Severity implied by an alert description
pub fn severity_for(description: &str) -> Severity {
    if description.contains("95%") || description.contains("5%") {
        Severity::Critical
    } else {
        Severity::Warning
    }
}

/// `count` alerts named `alert-001`, `alert-002`, ... created within the hour before `now`
pub fn alerts(count: usize, now: DateTime<Utc>) -> Vec<AlertRecord> {
    (0..count)
        .map(|i| {
            let (description, resource_id) = ALERT_KINDS[i % ALERT_KINDS.len()];
            let minutes_ago = 1 + (i as i64 * 13) % 60;
            let metric_value = METRIC_THRESHOLD + (i as u64 * 13 + 5) % 21;

            AlertRecord {
                id: format!("alert-{:03}", i + 1),
                severity: severity_for(description),
                resource_id: resource_id.to_string(),
                description: description.to_string(),
                created_at: now - Duration::minutes(minutes_ago),
                status: AlertStatus::New,
                properties: AlertProperties {
                    metric_value: Some(metric_value.into()),
                    threshold: Some(METRIC_THRESHOLD.into()),
                },
                extra: Default::default(),
            }
        })
        .collect()
}

/// Write `logs.json`, `configs.json` and the fix templates under `data_dir`
pub fn write_fixtures(data_dir: &Path, count: usize, now: DateTime<Utc>) -> Result<()> {
    let templates_dir = data_dir.join(TEMPLATES_DIR);
    std::fs::create_dir_all(&templates_dir)
        .with_context(|| format!("Failed to create data directory {:?}", templates_dir))?;

    let configs = resource_configs();
    write_json(&data_dir.join(CONFIGS_FILE), &configs)?;

    let alerts = alerts(count, now);
    write_json(&data_dir.join(LOGS_FILE), &alerts)?;

    for (name, content) in [
        (VM_RESIZE_TEMPLATE, VM_RESIZE_BICEP),
        (SQL_SCALE_TEMPLATE, SQL_SCALE_SCRIPT),
    ] {
        let path = templates_dir.join(name);
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write template {:?}", path))?;
    }

    info!(
        data_dir = %data_dir.display(),
        configs = configs.len(),
        alerts = alerts.len(),
        "Generated fixtures"
    );

    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value).context("Failed to serialize fixtures")?;
    content.push('\n');
    std::fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))
}
