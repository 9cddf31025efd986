use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_CONCLUSION: &str = "The test could not be performed.";

/// Outcome of a goodness-of-fit request. Failures are reported through the
/// same shape with a null statistic and p-value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub test_type: Option<String>,
    pub distribution_type: Option<String>,
    pub statistic: Option<f64>,
    pub p_value: Option<f64>,
    pub conclusion: String,
    pub details: Map<String, Value>,
}

impl TestResult {
    pub fn new(test_type: Option<String>, distribution_type: Option<String>) -> Self {
        Self {
            test_type,
            distribution_type,
            statistic: None,
            p_value: None,
            conclusion: DEFAULT_CONCLUSION.to_string(),
            details: Map::new(),
        }
    }

    /// Record a computed statistic and p-value, rounded to 4 decimal places.
    pub fn record(&mut self, statistic: f64, p_value: f64) {
        self.statistic = Some(round_to(statistic, 4));
        self.p_value = Some(round_to(p_value, 4));
    }

    pub fn with_conclusion(mut self, conclusion: impl Into<String>) -> Self {
        self.conclusion = conclusion.into();
        self
    }

    pub fn insert_detail(&mut self, key: &str, value: impl Into<Value>) {
        self.details.insert(key.to_string(), value.into());
    }

    pub fn is_computed(&self) -> bool {
        self.statistic.is_some() && self.p_value.is_some()
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
