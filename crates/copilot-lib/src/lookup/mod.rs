//! Lookup engine over the fixture store
//!
//! Resolves:
//! - alert IDs to alert summaries
//! - full resource paths or short names to resource configurations
//! - (issue, resource type) pairs to remediation templates
//!
//! Failures come back as [`LookupError`] values; nothing in here panics on
//! bad input or a broken store.

mod fix;

pub use fix::{
    is_cpu_issue, is_database_resource, is_dtu_issue, is_sql_capacity_issue, is_sql_issue,
    is_vm_cpu_issue, is_vm_resource, match_rule, FixQuery, FixRule, FixText, FIX_RULES,
    NO_TEMPLATE_MESSAGE, SQL_SCALE_TEMPLATE, VM_RESIZE_TEMPLATE,
};

use std::sync::Arc;
use thiserror::Error;

use crate::models::{AlertRecord, AlertSummary, ResourceConfig};
use crate::store::{FixtureStore, StoreFault};

/// Kind of record a lookup was looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Alert,
    Resource,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Alert => write!(f, "Alert"),
            RecordKind::Resource => write!(f, "Resource"),
        }
    }
}

/// Lookup failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Fixture file missing, unreadable or malformed
    #[error(transparent)]
    StoreUnavailable(#[from] StoreFault),

    /// Well-formed query with no matching record
    #[error("{kind} {id} not found.")]
    NotFound { kind: RecordKind, id: String },
}

/// First alert whose id equals `alert_id` exactly
pub fn find_alert<'a>(alerts: &'a [AlertRecord], alert_id: &str) -> Option<&'a AlertRecord> {
    alerts.iter().find(|alert| alert.id == alert_id)
}

/// Resource lookup by full path, falling back to short name.
///
/// An exact match anywhere in the collection beats a suffix match. Among
/// suffix matches the first in collection order wins; colliding short names
/// are not disambiguated further.
pub fn find_resource_config<'a>(
    configs: &'a [ResourceConfig],
    resource_id: &str,
) -> Option<&'a ResourceConfig> {
    configs
        .iter()
        .find(|config| config.resource_id == resource_id)
        .or_else(|| {
            let suffix = format!("/{resource_id}");
            configs
                .iter()
                .find(|config| config.resource_id.ends_with(&suffix))
        })
}

/// Read-only query interface over a shared [`FixtureStore`]
#[derive(Debug, Clone)]
pub struct LookupEngine {
    store: Arc<FixtureStore>,
}

impl LookupEngine {
    pub fn new(store: Arc<FixtureStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &FixtureStore {
        &self.store
    }

    /// Summarize the alert with the given id
    pub fn resolve_alert(&self, alert_id: &str) -> Result<AlertSummary, LookupError> {
        let alerts = self.store.alerts()?;

        find_alert(alerts, alert_id)
            .map(AlertSummary::from)
            .ok_or_else(|| LookupError::NotFound {
                kind: RecordKind::Alert,
                id: alert_id.to_string(),
            })
    }

    /// Full configuration of a resource given its path or short name
    pub fn resolve_resource_config(
        &self,
        resource_id: &str,
    ) -> Result<ResourceConfig, LookupError> {
        let configs = self.store.configs()?;

        find_resource_config(configs, resource_id)
            .cloned()
            .ok_or_else(|| LookupError::NotFound {
                kind: RecordKind::Resource,
                id: resource_id.to_string(),
            })
    }

    /// Remediation template for an issue on a resource type. Never fails.
    pub fn generate_fix(&self, issue_type: &str, resource_type: &str) -> FixText {
        fix::generate_fix(&self.store, issue_type, resource_type)
    }

    /// Every alert, or none when the store is unavailable
    pub fn list_all_alerts(&self) -> Vec<AlertRecord> {
        self.store.alerts().map(<[_]>::to_vec).unwrap_or_default()
    }

    /// Every resource configuration, or none when the store is unavailable
    pub fn list_all_resource_configs(&self) -> Vec<ResourceConfig> {
        self.store.configs().map(<[_]>::to_vec).unwrap_or_default()
    }
}
