//! Ops copilot server
//!
//! HTTP gateway in front of the copilot tool surface: chat forwarding to the
//! agent orchestrator, tool/resource/prompt endpoints, health and metrics.

pub mod api;
pub mod config;
pub mod orchestrator;
