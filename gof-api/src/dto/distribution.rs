use gof_core::{DistributionKind, DistributionParameters, DistributionSpec};
use gof_metrics::DistributionCurve;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDistributionRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "distributionType is required"))]
    pub distribution_type: String,
    #[serde(flatten)]
    pub parameters: DistributionParameters,
}

impl GenerateDistributionRequest {
    pub fn poisson(lambda: f64) -> Self {
        Self {
            distribution_type: DistributionKind::Poisson.as_str().to_string(),
            parameters: DistributionParameters::poisson(lambda),
        }
    }

    pub fn normal(mean: f64, std_dev: f64) -> Self {
        Self {
            distribution_type: DistributionKind::Normal.as_str().to_string(),
            parameters: DistributionParameters::normal(mean, std_dev),
        }
    }

    /// Resolve the requested family and its parameters.
    pub fn to_spec(&self) -> ApiResult<DistributionSpec> {
        let kind: DistributionKind = self.distribution_type.parse()?;
        self.parameters.resolve(kind).map_err(ApiError::from)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DistributionDataResponse {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

impl From<DistributionCurve> for DistributionDataResponse {
    fn from(curve: DistributionCurve) -> Self {
        Self {
            labels: curve.labels,
            data: curve.values,
        }
    }
}
