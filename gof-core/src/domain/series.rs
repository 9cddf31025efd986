use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

pub const TOTAL_TOO_LARGE: &str = "The total number of observations is too large to analyze.";

/// Observed counts, one per ordered bin. Bin indices are 1-based.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "Vec<u64>", into = "Vec<u64>")]
pub struct ObservedSeries(Vec<u64>);

impl ObservedSeries {
    pub fn new(counts: Vec<u64>) -> Result<Self> {
        if counts.is_empty() {
            return Err(CoreError::Validation(
                "observed series must contain at least one bin".to_string(),
            ));
        }
        if counts.iter().try_fold(0u64, |acc, &c| acc.checked_add(c)).is_none() {
            return Err(CoreError::Validation(TOTAL_TOO_LARGE.to_string()));
        }
        Ok(Self(counts))
    }

    /// Build a series from signed client input, rejecting negative counts.
    pub fn from_signed(counts: &[i64]) -> Result<Self> {
        let counts = counts
            .iter()
            .map(|&c| u64::try_from(c))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| {
                CoreError::Validation("Observed counts must be non-negative integers.".to_string())
            })?;
        Self::new(counts)
    }

    pub fn counts(&self) -> &[u64] {
        &self.0
    }

    pub fn num_bins(&self) -> usize {
        self.0.len()
    }

    /// Sum of all counts; construction guarantees it fits in a `u64`.
    pub fn total(&self) -> u64 {
        self.0.iter().fold(0u64, |acc, &c| acc.saturating_add(c))
    }

    /// Pairs of `(bin_index, count)` with 1-based bin indices.
    pub fn bins(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.0.iter().enumerate().map(|(i, &c)| (i + 1, c))
    }
}

impl TryFrom<Vec<u64>> for ObservedSeries {
    type Error = CoreError;

    fn try_from(counts: Vec<u64>) -> Result<Self> {
        Self::new(counts)
    }
}

impl From<ObservedSeries> for Vec<u64> {
    fn from(series: ObservedSeries) -> Self {
        series.0
    }
}

/// Observed and expected frequencies after adjacent low-expected bins were merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GroupedCategories {
    pub observed: Vec<u64>,
    pub expected: Vec<f64>,
}

impl GroupedCategories {
    pub fn push(&mut self, observed: u64, expected: f64) {
        self.observed.push(observed);
        self.expected.push(expected);
    }

    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    pub fn total_observed(&self) -> u64 {
        self.observed.iter().sum()
    }

    pub fn total_expected(&self) -> f64 {
        self.expected.iter().sum()
    }

    /// Number of categories whose expected frequency is below `threshold`.
    pub fn below_threshold(&self, threshold: f64) -> usize {
        self.expected.iter().filter(|&&e| e < threshold).count()
    }
}
