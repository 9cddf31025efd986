use std::sync::Arc;

use axum::{extract::State, Json};
use gof_core::TestResult;
use gof_metrics::GoodnessOfFitRequest;

use crate::{dto::*, observability::metrics::GofMetrics, ApiError, ApiResult, AppState};

/// Answers 200 for every well-formed body: failures travel inside the result's conclusion.
///
/// The exact KS distribution grows quickly with the sample size, so the run
/// moves off the async workers.
pub async fn run_test(
    State(state): State<AppState>,
    Json(payload): Json<RunGoodnessOfFitRequest>,
) -> ApiResult<Json<TestResult>> {
    let request = GoodnessOfFitRequest::from(payload);
    let runner = Arc::clone(&state.runner);
    let result = tokio::task::spawn_blocking(move || runner.run(&request))
        .await
        .map_err(|e| ApiError::Internal(format!("goodness-of-fit task failed: {}", e)))?;

    GofMetrics::test_completed(&result);

    Ok(Json(result))
}
