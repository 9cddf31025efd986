use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    dto::*,
    error::ApiResult,
    observability::metrics::GofMetrics,
    AppState,
};

pub async fn generate(
    State(state): State<AppState>,
    Json(payload): Json<GenerateDistributionRequest>,
) -> ApiResult<Json<DistributionDataResponse>> {
    payload.validate()?;

    let spec = payload.to_spec()?;
    let curve = state.evaluator.evaluate(&spec)?;

    GofMetrics::curve_generated(spec.kind().as_str());

    Ok(Json(DistributionDataResponse::from(curve)))
}
