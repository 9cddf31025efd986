use gof_core::DistributionParameters;
use gof_metrics::GoodnessOfFitRequest;
use serde::{Deserialize, Serialize};

/// Wire shape of a goodness-of-fit request. Every field is optional so that
/// missing values are reported in the result payload rather than rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunGoodnessOfFitRequest {
    #[serde(default)]
    pub test_type: Option<String>,
    #[serde(default)]
    pub distribution_type: Option<String>,
    #[serde(default)]
    pub observed_data: Option<Vec<i64>>,
    #[serde(flatten)]
    pub parameters: DistributionParameters,
}

impl From<RunGoodnessOfFitRequest> for GoodnessOfFitRequest {
    fn from(request: RunGoodnessOfFitRequest) -> Self {
        GoodnessOfFitRequest {
            test_type: request.test_type,
            distribution_type: request.distribution_type,
            observed: request.observed_data,
            parameters: request.parameters,
        }
    }
}
