//! Observability infrastructure for the ops copilot
//!
//! Provides:
//! - Prometheus metrics (tool invocations and latency, chat requests, fixture sizes)
//! - Structured JSON logging with tracing

use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge_vec, HistogramVec,
    IntCounterVec, IntGaugeVec,
};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Histogram buckets for tool latency (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.00005, 0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 1.0,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<CopilotMetricsInner> = OnceLock::new();

struct CopilotMetricsInner {
    tool_invocations: IntCounterVec,
    tool_latency_seconds: HistogramVec,
    chat_requests: IntCounterVec,
    fixture_records: IntGaugeVec,
}

impl CopilotMetricsInner {
    fn new() -> Self {
        Self {
            tool_invocations: register_int_counter_vec!(
                "ops_copilot_tool_invocations_total",
                "Tool invocations by tool name and outcome",
                &["tool", "outcome"]
            )
            .expect("Failed to register tool_invocations_total"),

            tool_latency_seconds: register_histogram_vec!(
                "ops_copilot_tool_latency_seconds",
                "Time spent answering a tool invocation",
                &["tool"],
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register tool_latency_seconds"),

            chat_requests: register_int_counter_vec!(
                "ops_copilot_chat_requests_total",
                "Chat requests by outcome",
                &["outcome"]
            )
            .expect("Failed to register chat_requests_total"),

            fixture_records: register_int_gauge_vec!(
                "ops_copilot_fixture_records",
                "Records loaded per fixture collection",
                &["collection"]
            )
            .expect("Failed to register fixture_records"),
        }
    }
}

/// Copilot metrics for Prometheus exposition
///
/// Lightweight handle to the global metrics instance; clones share the same
/// underlying metrics.
#[derive(Clone)]
pub struct CopilotMetrics {
    _private: (),
}

impl Default for CopilotMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl CopilotMetrics {
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(CopilotMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &CopilotMetricsInner {
        GLOBAL_METRICS.get_or_init(CopilotMetricsInner::new)
    }

    /// Record one tool invocation
    pub fn observe_tool_call(&self, tool: &str, outcome: &str, duration_secs: f64) {
        let inner = self.inner();
        inner
            .tool_invocations
            .with_label_values(&[tool, outcome])
            .inc();
        inner
            .tool_latency_seconds
            .with_label_values(&[tool])
            .observe(duration_secs);
    }

    pub fn inc_chat_requests(&self, outcome: &str) {
        self.inner().chat_requests.with_label_values(&[outcome]).inc();
    }

    pub fn set_fixture_records(&self, collection: &str, count: i64) {
        self.inner()
            .fixture_records
            .with_label_values(&[collection])
            .set(count);
    }
}

/// Structured logger for copilot events
#[derive(Clone)]
pub struct StructuredLogger {
    instance: String,
}

impl StructuredLogger {
    pub fn new(instance: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
        }
    }

    pub fn log_startup(&self, version: &str, data_dir: &str) {
        info!(
            event = "copilot_started",
            instance = %self.instance,
            version = %version,
            data_dir = %data_dir,
            "Ops copilot started"
        );
    }

    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "copilot_shutdown",
            instance = %self.instance,
            reason = %reason,
            "Ops copilot shutting down"
        );
    }

    /// Log a tool invocation; lookups that came back empty-handed log at warn
    pub fn log_tool_call(&self, tool: &str, outcome: &str, latency_ms: f64) {
        match outcome {
            "success" | "no_template" => {
                info!(
                    event = "tool_invoked",
                    instance = %self.instance,
                    tool = %tool,
                    outcome = %outcome,
                    latency_ms = latency_ms,
                    "Tool invoked"
                );
            }
            _ => {
                warn!(
                    event = "tool_invoked",
                    instance = %self.instance,
                    tool = %tool,
                    outcome = %outcome,
                    latency_ms = latency_ms,
                    "Tool invocation did not produce data"
                );
            }
        }
    }

    pub fn log_chat(&self, message_chars: usize, success: bool) {
        if success {
            info!(
                event = "chat_request",
                instance = %self.instance,
                message_chars = message_chars,
                success = true,
                "Chat request answered"
            );
        } else {
            warn!(
                event = "chat_request",
                instance = %self.instance,
                message_chars = message_chars,
                success = false,
                "Chat request failed"
            );
        }
    }
}
