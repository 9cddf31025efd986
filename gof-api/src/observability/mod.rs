//! Observability for the goodness-of-fit service: structured logging with
//! request correlation IDs and Prometheus metrics.

pub mod logging;
pub mod metrics;

pub use logging::{
    init_logging, request_logging_middleware, LogConfig, LogFormat, LoggingError,
    REQUEST_ID_HEADER,
};

pub use metrics::{increment_counter, init_metrics, metrics_handler, GofMetrics, MetricsError};
