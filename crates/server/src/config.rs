//! Copilot server configuration

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Server configuration, read from `COPILOT_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct CopilotConfig {
    /// Name reported in structured logs
    #[serde(default = "default_instance_name")]
    pub instance_name: String,

    /// HTTP port for chat, tools, health and metrics
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Directory holding logs.json, configs.json and templates/
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Chat endpoint of the external agent orchestrator
    #[serde(default)]
    pub orchestrator_url: Option<String>,

    /// Timeout for a single orchestrator round trip in seconds
    #[serde(default = "default_orchestrator_timeout")]
    pub orchestrator_timeout_secs: u64,
}

fn default_instance_name() -> String {
    std::env::var("HOSTNAME").unwrap_or_else(|_| "ops-copilot".to_string())
}

fn default_api_port() -> u16 {
    8000
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_orchestrator_timeout() -> u64 {
    120
}

impl CopilotConfig {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self> {
        Self::from_env(config::Environment::with_prefix("COPILOT"))
    }

    /// Load configuration from an environment source. Unset values take
    /// their defaults; a value that does not parse is an error.
    pub fn from_env(env: config::Environment) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(env.try_parsing(true))
            .build()?;

        config
            .try_deserialize()
            .context("Invalid COPILOT_* configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix("COPILOT").source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let config = CopilotConfig::from_env(env(&[])).unwrap();
        assert_eq!(config.api_port, 8000);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(config.orchestrator_url.is_none());
    }

    #[test]
    fn test_environment_overrides() {
        let config = CopilotConfig::from_env(env(&[
            ("COPILOT_API_PORT", "9100"),
            ("COPILOT_DATA_DIR", "/srv/fixtures"),
            ("COPILOT_ORCHESTRATOR_URL", "http://agent:8080/chat"),
        ]))
        .unwrap();

        assert_eq!(config.api_port, 9100);
        assert_eq!(config.data_dir, PathBuf::from("/srv/fixtures"));
        assert_eq!(
            config.orchestrator_url.as_deref(),
            Some("http://agent:8080/chat")
        );
    }

    #[test]
    fn test_bad_port_is_rejected_not_defaulted() {
        let err = CopilotConfig::from_env(env(&[
            ("COPILOT_API_PORT", "not-a-port"),
            ("COPILOT_DATA_DIR", "/srv/fixtures"),
            ("COPILOT_ORCHESTRATOR_URL", "http://agent:8080/chat"),
        ]))
        .unwrap_err();

        assert!(err.to_string().contains("Invalid COPILOT_* configuration"));
    }

    #[test]
    fn test_partial_environment_keeps_set_values() {
        let config = CopilotConfig::from_env(env(&[("COPILOT_DATA_DIR", "/srv/fixtures")])).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/fixtures"));
        assert_eq!(config.api_port, 8000);
        assert_eq!(config.orchestrator_timeout_secs, 120);
    }
}
