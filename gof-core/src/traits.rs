use serde_json::{Map, Value};

use crate::domain::{DistributionSpec, ObservedSeries, TestKind};
use crate::error::Result;

/// Everything a goodness-of-fit test needs from one request.
#[derive(Debug, Clone, Copy)]
pub struct FitInput<'a> {
    pub series: &'a ObservedSeries,
    pub spec: &'a DistributionSpec,
    /// Expected count per bin, summing to the series total.
    pub expected: &'a [f64],
}

#[derive(Debug, Clone, PartialEq)]
pub struct FitOutcome {
    pub statistic: f64,
    pub p_value: f64,
    pub details: Map<String, Value>,
}

pub trait GoodnessOfFitTest: Send + Sync {
    fn kind(&self) -> TestKind;

    fn run(&self, input: &FitInput<'_>) -> Result<FitOutcome>;
}
