use gof_core::{CoreError, Result};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::kolmogorov;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StatisticalResult {
    pub statistic: f64,
    pub p_value: f64,
    pub degrees_of_freedom: Option<f64>,
    pub sample_size: Option<u64>,
}

impl StatisticalResult {
    /// Fails with a computation error if either value is not a finite number.
    pub fn ensure_finite(self) -> Result<Self> {
        if !self.statistic.is_finite() {
            return Err(CoreError::Computation(format!(
                "test statistic is not a finite number ({})",
                self.statistic
            )));
        }
        if !self.p_value.is_finite() {
            return Err(CoreError::Computation(format!(
                "p-value is not a finite number ({})",
                self.p_value
            )));
        }
        Ok(self)
    }
}

pub struct StatisticalAnalyzer;

impl StatisticalAnalyzer {
    /// Pearson's Chi-square goodness-of-fit test with `k - 1` degrees of freedom.
    pub fn chi_square_goodness_of_fit(observed: &[f64], expected: &[f64]) -> Result<StatisticalResult> {
        if observed.len() != expected.len() {
            return Err(CoreError::Validation(format!(
                "observed ({}) and expected ({}) lengths differ",
                observed.len(),
                expected.len()
            )));
        }
        if observed.len() < 2 {
            return Err(CoreError::Computation(
                "at least two categories are required for a Chi-square test".to_string(),
            ));
        }
        if let Some(position) = expected.iter().position(|&e| e <= 0.0) {
            return Err(CoreError::Computation(format!(
                "expected frequency of category {} is not positive",
                position + 1
            )));
        }

        let statistic: f64 = observed
            .iter()
            .zip(expected)
            .map(|(&o, &e)| (o - e).powi(2) / e)
            .sum();

        let df = (observed.len() - 1) as f64;
        let chi2 = ChiSquared::new(df).map_err(|e| CoreError::Computation(e.to_string()))?;
        let p_value = chi2.sf(statistic);

        StatisticalResult {
            statistic,
            p_value,
            degrees_of_freedom: Some(df),
            sample_size: None,
        }
        .ensure_finite()
    }

    /// Two-sided one-sample Kolmogorov-Smirnov test of `sample` against `cdf`.
    ///
    /// D is `max(D+, D-)` over the sorted sample, with ties handled point by
    /// point so that discrete reference distributions behave like the usual
    /// sample-based implementations.
    pub fn ks_one_sample<F>(sample: &[f64], cdf: F, exact_max_sample: u64) -> Result<StatisticalResult>
    where
        F: Fn(f64) -> f64,
    {
        if sample.is_empty() {
            return Err(CoreError::DegenerateInput(
                "There are no observations to analyze.".to_string(),
            ));
        }

        let mut sorted = sample.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let n = sorted.len();
        let nf = n as f64;
        let mut d_plus = f64::NEG_INFINITY;
        let mut d_minus = f64::NEG_INFINITY;
        for (i, &x) in sorted.iter().enumerate() {
            let f = cdf(x);
            d_plus = d_plus.max((i + 1) as f64 / nf - f);
            d_minus = d_minus.max(f - i as f64 / nf);
        }
        let statistic = d_plus.max(d_minus);
        let p_value = kolmogorov::p_value(n as u64, statistic, exact_max_sample);

        StatisticalResult {
            statistic,
            p_value,
            degrees_of_freedom: None,
            sample_size: Some(n as u64),
        }
        .ensure_finite()
    }

    /// Largest absolute gap between two cumulative distributions evaluated on the same points.
    pub fn max_cdf_distance(empirical: &[f64], theoretical: &[f64]) -> f64 {
        empirical
            .iter()
            .zip(theoretical)
            .map(|(e, t)| (e - t).abs())
            .fold(0.0, f64::max)
    }
}
