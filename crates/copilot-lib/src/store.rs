//! Read-only fixture store
//!
//! Alert and configuration collections are parsed from JSON files the first
//! time they are needed and then kept for the lifetime of the store. Nothing
//! here ever writes to disk; fixtures are produced offline (see
//! [`crate::fixtures`]).

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{AlertRecord, ResourceConfig};

/// Alert collection file name inside the data directory
pub const LOGS_FILE: &str = "logs.json";

/// Resource configuration collection file name inside the data directory
pub const CONFIGS_FILE: &str = "configs.json";

/// Directory holding fix templates, relative to the data directory
pub const TEMPLATES_DIR: &str = "templates";

/// The two JSON collections backing the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Logs,
    Configs,
}

impl Collection {
    pub fn file_name(&self) -> &'static str {
        match self {
            Collection::Logs => LOGS_FILE,
            Collection::Configs => CONFIGS_FILE,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Collection::Logs => "Logs",
            Collection::Configs => "Configs",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Why a collection could not be served
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreFault {
    #[error("{} file not found.", .0.label())]
    Missing(Collection),

    #[error("{detail}")]
    Unreadable { collection: Collection, detail: String },
}

impl StoreFault {
    pub fn collection(&self) -> Collection {
        match self {
            StoreFault::Missing(collection) => *collection,
            StoreFault::Unreadable { collection, .. } => *collection,
        }
    }
}

/// Fixture store rooted at a data directory.
///
/// Cheap to construct; each collection is loaded on first access. Concurrent
/// first accesses may both read the file, the first result to land is kept.
#[derive(Debug)]
pub struct FixtureStore {
    data_dir: PathBuf,
    alerts: OnceLock<Result<Vec<AlertRecord>, StoreFault>>,
    configs: OnceLock<Result<Vec<ResourceConfig>, StoreFault>>,
}

impl FixtureStore {
    /// Create a store over `data_dir` without touching the filesystem
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            alerts: OnceLock::new(),
            configs: OnceLock::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of a collection file
    pub fn path(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.file_name())
    }

    /// Path of a named fix template
    pub fn template_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(TEMPLATES_DIR).join(name)
    }

    /// All alert records, in file order
    pub fn alerts(&self) -> Result<&[AlertRecord], StoreFault> {
        self.alerts
            .get_or_init(|| load_collection(&self.path(Collection::Logs), Collection::Logs))
            .as_deref()
            .map_err(Clone::clone)
    }

    /// All resource configurations, in file order
    pub fn configs(&self) -> Result<&[ResourceConfig], StoreFault> {
        self.configs
            .get_or_init(|| load_collection(&self.path(Collection::Configs), Collection::Configs))
            .as_deref()
            .map_err(Clone::clone)
    }

    /// Raw file text of a collection, `None` when the file cannot be read
    pub fn read_raw(&self, collection: Collection) -> Option<String> {
        std::fs::read_to_string(self.path(collection)).ok()
    }

    /// Text of a named fix template, `None` when it is not on disk
    pub fn template(&self, name: &str) -> Option<String> {
        let path = self.template_path(name);
        match std::fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Fix template unavailable");
                None
            }
        }
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.template_path(name).is_file()
    }
}

fn load_collection<T: DeserializeOwned>(
    path: &Path,
    collection: Collection,
) -> Result<Vec<T>, StoreFault> {
    if !path.exists() {
        warn!(path = %path.display(), "Fixture file not found");
        return Err(StoreFault::Missing(collection));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "Failed to read fixture file");
        StoreFault::Unreadable {
            collection,
            detail: e.to_string(),
        }
    })?;

    let records: Vec<T> = serde_json::from_str(&content).map_err(|e| {
        warn!(path = %path.display(), error = %e, "Failed to parse fixture file");
        StoreFault::Unreadable {
            collection,
            detail: e.to_string(),
        }
    })?;

    debug!(path = %path.display(), count = records.len(), "Loaded fixture collection");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AlertStatus;
    use tempfile::TempDir;

    const ONE_CONFIG: &str = r#"[
  {
    "resource_id": "/subscriptions/sub-1/resourceGroups/rg-1/providers/Microsoft.Web/sites/app-01",
    "type": "Microsoft.Web/sites",
    "location": "eastus",
    "properties": {},
    "compliance_status": "Compliant"
  }
]"#;

    #[test]
    fn test_missing_collection_reports_missing() {
        let dir = TempDir::new().unwrap();
        let store = FixtureStore::open(dir.path());

        let fault = store.alerts().unwrap_err();
        assert_eq!(fault, StoreFault::Missing(Collection::Logs));
        assert_eq!(fault.to_string(), "Logs file not found.");
        assert_eq!(
            store.configs().unwrap_err().to_string(),
            "Configs file not found."
        );
    }

    #[test]
    fn test_malformed_collection_reports_unreadable() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(LOGS_FILE), "{ not json").unwrap();
        let store = FixtureStore::open(dir.path());

        match store.alerts().unwrap_err() {
            StoreFault::Unreadable { collection, detail } => {
                assert_eq!(collection, Collection::Logs);
                assert!(!detail.is_empty());
            }
            other => panic!("unexpected fault: {other:?}"),
        }
    }

    #[test]
    fn test_collection_loaded_once() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIGS_FILE), ONE_CONFIG).unwrap();
        let store = FixtureStore::open(dir.path());

        assert_eq!(store.configs().unwrap().len(), 1);

        // Later edits to the file are not observed
        std::fs::write(dir.path().join(CONFIGS_FILE), "[]").unwrap();
        assert_eq!(store.configs().unwrap().len(), 1);
    }

    #[test]
    fn test_read_raw_and_templates() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIGS_FILE), ONE_CONFIG).unwrap();
        std::fs::create_dir_all(dir.path().join(TEMPLATES_DIR)).unwrap();
        std::fs::write(dir.path().join(TEMPLATES_DIR).join("fix.sh"), "echo fix").unwrap();
        let store = FixtureStore::open(dir.path());

        assert_eq!(store.read_raw(Collection::Configs).as_deref(), Some(ONE_CONFIG));
        assert_eq!(store.read_raw(Collection::Logs), None);
        assert_eq!(store.template("fix.sh").as_deref(), Some("echo fix"));
        assert!(store.has_template("fix.sh"));
        assert!(!store.has_template("other.sh"));
        assert_eq!(store.template("other.sh"), None);
    }

    #[test]
    fn test_unfamiliar_alert_status_still_loads() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(LOGS_FILE),
            r#"[
  {"id": "alert-001", "severity": "Critical", "resource_id": "vm-01",
   "description": "High CPU usage detected (95%)", "created_at": "2026-10-16T11:59:00Z",
   "status": "New", "properties": {"metric_value": 95, "threshold": 80}},
  {"id": "alert-002", "severity": "Warning", "resource_id": "db-01",
   "description": "SQL Database DTU usage high (90%)", "created_at": "2026-10-16T11:46:00Z",
   "status": "Resolved", "properties": {}}
]"#,
        )
        .unwrap();
        let store = FixtureStore::open(dir.path());

        let alerts = store.alerts().unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].status, AlertStatus::New);
        assert_eq!(alerts[1].status, AlertStatus::Other("Resolved".to_string()));
    }
}
