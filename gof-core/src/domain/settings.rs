use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Result;

/// How an observed bin maps onto a Poisson event count.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PoissonBinOrigin {
    /// Bin `i` counts `i` events.
    #[default]
    One,
    /// Bin `i` counts `i - 1` events.
    Zero,
}

impl PoissonBinOrigin {
    /// Event count represented by the 1-based `bin`.
    pub fn event_count(self, bin: usize) -> u64 {
        match self {
            PoissonBinOrigin::One => bin as u64,
            PoissonBinOrigin::Zero => bin.saturating_sub(1) as u64,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Alpha used to reject the null hypothesis.
    #[validate(range(exclusive_min = 0.0, exclusive_max = 1.0))]
    pub significance_level: f64,
    /// Minimum expected count per Chi-square category.
    #[validate(range(min = 0.0))]
    pub min_expected_frequency: f64,
    pub poisson_bin_origin: PoissonBinOrigin,
    /// Upper bound on the synthetic Kolmogorov-Smirnov sample.
    #[validate(range(min = 1))]
    pub max_observations: u64,
    /// Largest sample for which the exact Kolmogorov distribution is used.
    #[validate(range(min = 1))]
    pub ks_exact_max_sample: u64,
    #[validate(range(min = 2))]
    pub normal_curve_points: usize,
    pub poisson_curve_min_k: u64,
    /// Largest number of points a generated curve may hold.
    #[validate(range(min = 2))]
    pub max_curve_points: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            significance_level: 0.05,
            min_expected_frequency: 5.0,
            poisson_bin_origin: PoissonBinOrigin::One,
            max_observations: 100_000,
            ks_exact_max_sample: 1_000,
            normal_curve_points: 101,
            poisson_curve_min_k: 15,
            max_curve_points: 10_000,
        }
    }
}

impl AnalysisSettings {
    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }
}
