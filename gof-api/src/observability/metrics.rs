//! Prometheus metrics for the goodness-of-fit service.
//!
//! # Example
//!
//! ```rust,ignore
//! use gof_api::observability::metrics::{init_metrics, metrics_handler};
//! use axum::{Router, routing::get};
//!
//! init_metrics().expect("Failed to initialize metrics");
//! let app: Router<()> = Router::new().route("/metrics", get(metrics_handler));
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gof_core::{DistributionKind, TestKind, TestResult};
use metrics::{counter, describe_counter, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use tracing::error;

pub const GOF_TESTS_TOTAL: &str = "gof_tests_total";
pub const DISTRIBUTION_CURVES_TOTAL: &str = "distribution_curves_total";

/// Global Prometheus handle for metrics export
static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the Prometheus recorder. Calling it again after a successful
/// install is a no-op.
pub fn init_metrics() -> Result<(), MetricsError> {
    if PROMETHEUS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::Installation("Handle already set".to_string()))?;

    register_metric_descriptions();

    Ok(())
}

fn register_metric_descriptions() {
    describe_counter!(
        GOF_TESTS_TOTAL,
        Unit::Count,
        "Total number of goodness-of-fit tests run"
    );
    describe_counter!(
        DISTRIBUTION_CURVES_TOTAL,
        Unit::Count,
        "Total number of theoretical distribution curves generated"
    );
}

#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("Failed to install metrics exporter: {0}")]
    Installation(String),
}

/// Axum handler that returns Prometheus metrics in text format.
pub async fn metrics_handler() -> Response {
    match PROMETHEUS_HANDLE.get() {
        Some(handle) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => {
            error!("Metrics handler called but metrics not initialized");
            (StatusCode::INTERNAL_SERVER_ERROR, "Metrics not initialized").into_response()
        }
    }
}

/// Helper function to increment a counter
pub fn increment_counter(metric_name: &str, labels: &[(&str, &str)]) {
    let metric_name = metric_name.to_string();
    let label_vec: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    counter!(metric_name, &label_vec).increment(1);
}

/// Domain counters recorded by the handlers.
pub struct GofMetrics;

impl GofMetrics {
    pub fn curve_generated(distribution: &str) {
        increment_counter(DISTRIBUTION_CURVES_TOTAL, &[("distribution", distribution)]);
    }

    pub fn test_completed(result: &TestResult) {
        let (test, distribution, outcome) = Self::test_labels(result);
        increment_counter(
            GOF_TESTS_TOTAL,
            &[("test", test), ("distribution", distribution), ("outcome", outcome)],
        );
    }

    /// Labels are restricted to known kinds so client input cannot grow the
    /// label set.
    pub fn test_labels(result: &TestResult) -> (&'static str, &'static str, &'static str) {
        let test = result
            .test_type
            .as_deref()
            .and_then(|t| t.parse::<TestKind>().ok())
            .map_or("unknown", |kind| kind.as_str());
        let distribution = result
            .distribution_type
            .as_deref()
            .and_then(|d| d.parse::<DistributionKind>().ok())
            .map_or("unknown", |kind| kind.as_str());
        let outcome = if result.is_computed() {
            "computed"
        } else {
            "not_computed"
        };
        (test, distribution, outcome)
    }
}
