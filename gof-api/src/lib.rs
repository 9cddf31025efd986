pub mod dto;
pub mod error;
pub mod handlers;
pub mod observability;

pub use dto::*;
pub use error::{ApiError, ApiResult};

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use gof_core::AnalysisSettings;
use gof_metrics::{DistributionEvaluator, GoodnessOfFitRunner};

/// Shared, immutable service state built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub evaluator: Arc<DistributionEvaluator>,
    pub runner: Arc<GoodnessOfFitRunner>,
}

impl AppState {
    pub fn new(settings: AnalysisSettings) -> Self {
        Self {
            evaluator: Arc::new(DistributionEvaluator::new(&settings)),
            runner: Arc::new(GoodnessOfFitRunner::new(settings)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AnalysisSettings::default())
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/hello", get(handlers::system::hello))
        .route(
            "/api/generate_distribution_data",
            post(handlers::distributions::generate),
        )
        .route(
            "/api/run_goodness_of_fit_test",
            post(handlers::goodness_of_fit::run_test),
        )
        .with_state(state)
}
