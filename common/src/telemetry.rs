// Telemetry module for structured logging and metrics

use anyhow::Result;
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize structured logging
///
/// Sets up the tracing subscriber with JSON formatting and log levels taken
/// from the environment, falling back to the configured level.
pub fn init_logging(log_level: &str, json: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| anyhow::anyhow!("Failed to create env filter: {}", e))?;

    let registry = tracing_subscriber::registry();

    if json {
        let json_layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_filter(env_filter);
        registry
            .with(json_layer)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {}", e))?;
    } else {
        let fmt_layer = fmt::layer().with_target(false).with_filter(env_filter);
        registry
            .with(fmt_layer)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {}", e))?;
    }

    tracing::info!(log_level = log_level, "Structured logging initialized");
    Ok(())
}

/// Install the Prometheus metrics recorder and register metric descriptions
///
/// Returns the handle used by the `/metrics` endpoint to render the
/// exposition text.
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics recorder: {}", e))?;

    describe_counter!(
        "http_requests_total",
        "Total HTTP requests handled, labeled by route and status"
    );
    describe_counter!(
        "schedule_runs_total",
        "Total task scheduling runs, labeled by outcome"
    );
    describe_histogram!(
        "schedule_tasks_count",
        "Number of tasks assigned a due date per scheduling run"
    );

    tracing::info!("Metrics recorder installed");
    Ok(handle)
}
