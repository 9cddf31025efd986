use anyhow::Result;
use axum::{middleware, routing::get, Router};
use gof_api::{
    handlers::system::health_check,
    observability::{init_logging, init_metrics, metrics_handler, request_logging_middleware},
    AppState,
};
use std::net::SocketAddr;
use tower_http::{services::ServeDir, trace::TraceLayer};

mod config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::Config::load()?;

    init_logging(&config.log)?;
    tracing::info!("Starting goodness-of-fit lab server");

    init_metrics()?;
    tracing::info!(
        significance_level = config.analysis.significance_level,
        poisson_bin_origin = ?config.analysis.poisson_bin_origin,
        "Configuration loaded"
    );

    let state = AppState::new(config.analysis.clone());
    let app = app(state, &config.static_dir);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn app(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .merge(gof_api::routes(state))
        .fallback_service(ServeDir::new(static_dir).append_index_html_on_directories(true))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
}
