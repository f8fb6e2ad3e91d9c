//! Core data models for the ops copilot fixtures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Alert severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "Warning"),
            Severity::Critical => write!(f, "Critical"),
        }
    }
}

/// Lifecycle state of an alert.
///
/// Alert sources add states over time; anything unrecognised is kept
/// verbatim in `Other` so one record never makes the collection unreadable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertStatus {
    New,
    Acknowledged,
    Closed,
    #[serde(untagged)]
    Other(String),
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertStatus::New => write!(f, "New"),
            AlertStatus::Acknowledged => write!(f, "Acknowledged"),
            AlertStatus::Closed => write!(f, "Closed"),
            AlertStatus::Other(status) => f.write_str(status),
        }
    }
}

/// Policy compliance of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceStatus {
    Compliant,
    NonCompliant,
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplianceStatus::Compliant => write!(f, "Compliant"),
            ComplianceStatus::NonCompliant => write!(f, "NonCompliant"),
        }
    }
}

/// Metric snapshot attached to an alert.
///
/// Numbers are kept as `serde_json::Number` so integers in the fixture file
/// survive a round trip without turning into floats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_value: Option<serde_json::Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<serde_json::Number>,
}

/// Azure Monitor alert record as stored in `logs.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: String,
    pub severity: Severity,
    /// Full resource path; not checked against the config collection
    pub resource_id: String,
    pub description: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    pub status: AlertStatus,
    #[serde(default)]
    pub properties: AlertProperties,
    /// Fields outside the known schema, carried through unchanged
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Resource configuration record as stored in `configs.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfig {
    pub resource_id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub location: String,
    #[serde(default)]
    pub properties: serde_json::Value,
    pub compliance_status: ComplianceStatus,
    /// Fields outside the known schema (tags, sku, ...), carried through
    /// unchanged so the record serializes back losslessly
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ResourceConfig {
    /// Final path segment of the resource id, e.g. `vm-01`
    pub fn short_name(&self) -> &str {
        self.resource_id
            .rsplit('/')
            .next()
            .unwrap_or(&self.resource_id)
    }
}

/// Condensed view of an alert returned by `analyze_alert`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertSummary {
    pub id: String,
    pub severity: Severity,
    pub resource_id: String,
    pub description: String,
    pub metric_value: Option<serde_json::Number>,
}

impl From<&AlertRecord> for AlertSummary {
    fn from(alert: &AlertRecord) -> Self {
        Self {
            id: alert.id.clone(),
            severity: alert.severity,
            resource_id: alert.resource_id.clone(),
            description: alert.description.clone(),
            metric_value: alert.properties.metric_value.clone(),
        }
    }
}

impl std::fmt::Display for AlertSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let metric = self
            .metric_value
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "None".to_string());

        write!(
            f,
            "Alert Analysis:\nID: {}\nSeverity: {}\nResource: {}\nDescription: {}\nMetric Value: {}",
            self.id, self.severity, self.resource_id, self.description, metric
        )
    }
}

/// Alert timestamps are written as RFC 3339. Older fixture files carry naive
/// ISO 8601 timestamps without an offset; those are read as UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;

        if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(parsed.with_timezone(&Utc));
        }

        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|e| de::Error::custom(format!("invalid timestamp {raw:?}: {e}")))
    }
}
