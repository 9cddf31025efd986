//! Structured logging and request correlation.
//!
//! # Examples
//!
//! ```rust,no_run
//! use gof_api::observability::logging::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::default()).expect("Failed to initialize logging");
//! ```

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, Instrument};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};
use uuid::Uuid;

/// HTTP header for request correlation ID
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Machine-readable, one JSON object per event
    Json,
    Pretty,
    Compact,
}

impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        return Self::Pretty;

        #[cfg(not(debug_assertions))]
        return Self::Json;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Default level when neither `filter` nor `RUST_LOG` is set
    pub level: String,
    /// Per-module directives (e.g. "gof_metrics=debug,tower_http=info")
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: "info".to_string(),
            filter: None,
        }
    }
}

impl LogConfig {
    fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        match self.filter {
            Some(ref filter) => {
                EnvFilter::try_new(filter).map_err(|e| LoggingError::Filter(e.to_string()))
            }
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&self.level))),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Failed to install log subscriber: {0}")]
    Install(String),
}

// ============================================================================
// Request Logging Middleware
// ============================================================================

/// Extract or generate request ID from headers
fn extract_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Logs every request with a correlation ID and echoes the ID back in the
/// `X-Request-ID` response header.
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = extract_request_id(request.headers());

    let method = request.method().to_string();
    let uri = request.uri().to_string();

    let span = tracing::info_span!("request", request.id = %request_id);

    async move {
        info!(request.method = %method, request.uri = %uri, "Incoming request");

        let response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;
        let status = response.status();

        if status.is_server_error() {
            tracing::error!(
                response.status = status.as_u16(),
                response.duration_ms = duration_ms,
                "Request completed with server error"
            );
        } else if status.is_client_error() {
            tracing::warn!(
                response.status = status.as_u16(),
                response.duration_ms = duration_ms,
                "Request completed with client error"
            );
        } else {
            tracing::info!(
                response.status = status.as_u16(),
                response.duration_ms = duration_ms,
                "Request completed successfully"
            );
        }

        let (mut parts, body) = response.into_parts();
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            parts.headers.insert(REQUEST_ID_HEADER, value);
        }
        Response::from_parts(parts, body)
    }
    .instrument(span)
    .await
}

// ============================================================================
// Logging Initialization
// ============================================================================

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    let env_filter = config.env_filter()?;

    let installed = match config.format {
        LogFormat::Json => {
            let json_layer = fmt::layer()
                .json()
                .with_span_events(FmtSpan::CLOSE)
                .with_current_span(true)
                .with_thread_ids(true)
                .with_filter(env_filter);

            tracing_subscriber::registry().with(json_layer).try_init()
        }
        LogFormat::Pretty => {
            let pretty_layer = fmt::layer()
                .pretty()
                .with_thread_names(true)
                .with_filter(env_filter);

            tracing_subscriber::registry().with(pretty_layer).try_init()
        }
        LogFormat::Compact => {
            let compact_layer = fmt::layer().compact().with_filter(env_filter);

            tracing_subscriber::registry().with(compact_layer).try_init()
        }
    };
    installed.map_err(|e| LoggingError::Install(e.to_string()))?;

    info!("Logging system initialized with format: {:?}", config.format);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        async fn handler() -> &'static str {
            "ok"
        }

        Router::new()
            .route("/", get(handler))
            .layer(middleware::from_fn(request_logging_middleware))
    }

    #[test]
    fn test_log_format_deserialization() {
        let format: LogFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, LogFormat::Json);
        let format: LogFormat = serde_json::from_str("\"compact\"").unwrap();
        assert_eq!(format, LogFormat::Compact);
        assert!(serde_json::from_str::<LogFormat>("\"xml\"").is_err());
    }

    #[test]
    fn test_log_config_partial_deserialization() {
        let config: LogConfig = serde_json::from_str(r#"{"level": "debug"}"#).unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::default());
        assert!(config.filter.is_none());
    }

    #[test]
    fn test_invalid_filter_is_rejected() {
        let config = LogConfig {
            filter: Some("gof_metrics=notalevel".to_string()),
            ..LogConfig::default()
        };
        assert!(matches!(config.env_filter(), Err(LoggingError::Filter(_))));
    }

    #[test]
    fn test_extract_request_id_generates_uuid() {
        let id = extract_request_id(&HeaderMap::new());
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[tokio::test]
    async fn test_middleware_echoes_request_id() {
        let request = Request::builder()
            .uri("/")
            .header(REQUEST_ID_HEADER, "abc-123")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "abc-123");
    }

    #[tokio::test]
    async fn test_middleware_assigns_request_id() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = app().oneshot(request).await.unwrap();

        let id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }
}
