//! Addressable read-only resources

use serde::{Deserialize, Serialize};

use crate::store::Collection;

pub const RECENT_LOGS_URI: &str = "azure://logs/recent";
pub const ALL_CONFIGS_URI: &str = "azure://configs/all";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
}

pub fn definitions() -> Vec<ResourceDefinition> {
    vec![
        ResourceDefinition {
            uri: RECENT_LOGS_URI.to_string(),
            name: "recent_logs".to_string(),
            description: "Get the most recent Azure Monitor logs.".to_string(),
            mime_type: "application/json".to_string(),
        },
        ResourceDefinition {
            uri: ALL_CONFIGS_URI.to_string(),
            name: "all_configs".to_string(),
            description: "Get all resource configurations.".to_string(),
            mime_type: "application/json".to_string(),
        },
    ]
}

/// Collection served at a resource URI
pub fn collection_for(uri: &str) -> Option<Collection> {
    match uri {
        RECENT_LOGS_URI => Some(Collection::Logs),
        ALL_CONFIGS_URI => Some(Collection::Configs),
        _ => None,
    }
}
