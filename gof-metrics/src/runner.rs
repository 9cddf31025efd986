use gof_core::{
    AnalysisSettings, CoreError, DistributionKind, DistributionParameters, DistributionSpec,
    FitInput, FitOutcome, GoodnessOfFitTest, ObservedSeries, Result, TestKind, TestResult,
};
use serde::{Deserialize, Serialize};

use crate::{
    expected::ExpectedFrequencyGenerator,
    goodness::{ChiSquareTest, KolmogorovSmirnovTest},
    grouping::CategoryGrouper,
};

pub const NO_OBSERVATIONS: &str = "There are no observations to analyze.";
pub const MISSING_OBSERVED_DATA: &str = "No observed data was provided.";
pub const UNSUPPORTED_DISTRIBUTION: &str = "Unsupported distribution type for the test.";
pub const UNSUPPORTED_TEST: &str = "Unsupported test type or invalid parameters.";

/// A goodness-of-fit request as received, before any validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GoodnessOfFitRequest {
    pub test_type: Option<String>,
    pub distribution_type: Option<String>,
    pub observed: Option<Vec<i64>>,
    pub parameters: DistributionParameters,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Idle,
    Validating,
    Computing,
    Reporting,
}

/// Whether the observed data is consistent with the theoretical model at `alpha`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Reject,
    FailToReject,
}

impl Verdict {
    pub fn from_p_value(p_value: f64, alpha: f64) -> Self {
        if p_value < alpha {
            Verdict::Reject
        } else {
            Verdict::FailToReject
        }
    }

    pub fn conclusion(&self, distribution: DistributionKind, p_value: f64, alpha: f64) -> String {
        let name = distribution.display_name();
        match self {
            Verdict::Reject => format!(
                "Reject the null hypothesis (H0). The observed data do NOT fit a {} distribution \
                 with the given parameters (p-value = {:.4} < {}).",
                name, p_value, alpha
            ),
            Verdict::FailToReject => format!(
                "Fail to reject the null hypothesis (H0). The observed data MAY fit a {} \
                 distribution with the given parameters (p-value = {:.4} >= {}).",
                name, p_value, alpha
            ),
        }
    }
}

#[derive(Debug, Clone)]
struct ValidatedRequest {
    test: TestKind,
    spec: DistributionSpec,
    series: ObservedSeries,
}

/// Runs one goodness-of-fit request end to end. Never fails: every problem is
/// reported inside the returned [`TestResult`].
#[derive(Debug, Clone)]
pub struct GoodnessOfFitRunner {
    settings: AnalysisSettings,
    generator: ExpectedFrequencyGenerator,
    chi_square: ChiSquareTest,
    kolmogorov_smirnov: KolmogorovSmirnovTest,
}

impl GoodnessOfFitRunner {
    pub fn new(settings: AnalysisSettings) -> Self {
        let grouper = CategoryGrouper::new(settings.min_expected_frequency);
        Self {
            generator: ExpectedFrequencyGenerator::new(settings.poisson_bin_origin),
            chi_square: ChiSquareTest::new(grouper),
            kolmogorov_smirnov: KolmogorovSmirnovTest {
                origin: settings.poisson_bin_origin,
                max_observations: settings.max_observations,
                exact_max_sample: settings.ks_exact_max_sample,
            },
            settings,
        }
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    fn test_for(&self, kind: TestKind) -> &dyn GoodnessOfFitTest {
        match kind {
            TestKind::ChiSquare => &self.chi_square,
            TestKind::KolmogorovSmirnov => &self.kolmogorov_smirnov,
        }
    }

    pub fn run(&self, request: &GoodnessOfFitRequest) -> TestResult {
        let mut state = RunnerState::Idle;
        let result = TestResult::new(request.test_type.clone(), request.distribution_type.clone());

        transition(&mut state, RunnerState::Validating);
        let validated = match validate(request) {
            Ok(validated) => validated,
            Err(err) => {
                transition(&mut state, RunnerState::Reporting);
                tracing::info!(reason = %err, "Goodness-of-fit request rejected");
                return result.with_conclusion(validation_conclusion(&err));
            }
        };

        transition(&mut state, RunnerState::Computing);
        let outcome = self.compute(&validated);

        transition(&mut state, RunnerState::Reporting);
        self.report(result, &validated, outcome)
    }

    fn compute(&self, request: &ValidatedRequest) -> Result<FitOutcome> {
        let expected = self.generator.counts(
            &request.spec,
            request.series.num_bins(),
            request.series.total(),
        )?;

        let input = FitInput {
            series: &request.series,
            spec: &request.spec,
            expected: &expected,
        };
        let test = self.test_for(request.test);
        let outcome = test.run(&input)?;

        if !outcome.statistic.is_finite() || !outcome.p_value.is_finite() {
            return Err(CoreError::Computation(
                "the test produced a statistic or p-value that is not a number".to_string(),
            ));
        }
        Ok(outcome)
    }

    fn report(
        &self,
        mut result: TestResult,
        request: &ValidatedRequest,
        outcome: Result<FitOutcome>,
    ) -> TestResult {
        let distribution = request.spec.kind();
        match outcome {
            Ok(outcome) => {
                let alpha = self.settings.significance_level;
                let verdict = Verdict::from_p_value(outcome.p_value, alpha);

                tracing::info!(
                    test = %request.test,
                    distribution = %distribution,
                    statistic = outcome.statistic,
                    p_value = outcome.p_value,
                    verdict = ?verdict,
                    "Goodness-of-fit test completed"
                );

                result.record(outcome.statistic, outcome.p_value);
                result.details = outcome.details;
                result.conclusion = verdict.conclusion(distribution, outcome.p_value, alpha);
                result
            }
            Err(CoreError::Computation(message)) => {
                tracing::warn!(test = %request.test, error = %message, "Goodness-of-fit test failed");
                result.insert_detail("error_message", message.clone());
                result.with_conclusion(format!(
                    "Error while running the {} test: {}",
                    request.test.display_name(),
                    message
                ))
            }
            Err(err) => {
                tracing::info!(test = %request.test, reason = %err, "Goodness-of-fit test not run");
                result.with_conclusion(err.to_string())
            }
        }
    }
}

impl Default for GoodnessOfFitRunner {
    fn default() -> Self {
        Self::new(AnalysisSettings::default())
    }
}

fn transition(state: &mut RunnerState, next: RunnerState) {
    tracing::trace!(from = ?state, to = ?next, "Runner state transition");
    *state = next;
}

fn validate(request: &GoodnessOfFitRequest) -> Result<ValidatedRequest> {
    let observed = request
        .observed
        .as_deref()
        .ok_or_else(|| CoreError::Validation(MISSING_OBSERVED_DATA.to_string()))?;

    let total: i128 = observed.iter().map(|&c| c as i128).sum();
    if observed.iter().all(|&c| c >= 0) && total == 0 {
        return Err(CoreError::DegenerateInput(NO_OBSERVATIONS.to_string()));
    }
    let series = ObservedSeries::from_signed(observed)?;

    let kind: DistributionKind = request
        .distribution_type
        .as_deref()
        .ok_or_else(|| CoreError::UnsupportedType(UNSUPPORTED_DISTRIBUTION.to_string()))?
        .parse()
        .map_err(|_| CoreError::UnsupportedType(UNSUPPORTED_DISTRIBUTION.to_string()))?;

    let spec = request.parameters.resolve(kind)?;

    let test: TestKind = request
        .test_type
        .as_deref()
        .ok_or_else(|| CoreError::UnsupportedType(UNSUPPORTED_TEST.to_string()))?
        .parse()
        .map_err(|_| CoreError::UnsupportedType(UNSUPPORTED_TEST.to_string()))?;

    Ok(ValidatedRequest { test, spec, series })
}

fn validation_conclusion(err: &CoreError) -> String {
    match err {
        CoreError::InvalidParameter { .. } => format!("{}.", err),
        CoreError::Validation(message)
        | CoreError::UnsupportedType(message)
        | CoreError::DegenerateInput(message) => message.clone(),
        other => other.to_string(),
    }
}
