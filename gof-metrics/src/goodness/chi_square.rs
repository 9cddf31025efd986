use gof_core::{FitInput, FitOutcome, GoodnessOfFitTest, Result, TestKind};
use serde_json::{json, Map};

use crate::{grouping::CategoryGrouper, statistical::StatisticalAnalyzer};

/// Chi-square test over grouped categories.
///
/// Degrees of freedom are `categories - 1`: distribution parameters are
/// supplied by the caller, not estimated from the data.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChiSquareTest {
    pub grouper: CategoryGrouper,
}

impl ChiSquareTest {
    pub fn new(grouper: CategoryGrouper) -> Self {
        Self { grouper }
    }
}

impl GoodnessOfFitTest for ChiSquareTest {
    fn kind(&self) -> TestKind {
        TestKind::ChiSquare
    }

    fn run(&self, input: &FitInput<'_>) -> Result<FitOutcome> {
        let grouped = self.grouper.group(input.series.counts(), input.expected)?;
        let observed: Vec<f64> = grouped.observed.iter().map(|&o| o as f64).collect();

        let result = StatisticalAnalyzer::chi_square_goodness_of_fit(&observed, &grouped.expected)?;

        let residual_categories = grouped.below_threshold(self.grouper.threshold);
        if residual_categories > 0 {
            tracing::debug!(
                residual_categories,
                threshold = self.grouper.threshold,
                "Final category is below the expected-frequency threshold"
            );
        }

        let mut details = Map::new();
        details.insert("degrees_of_freedom".to_string(), json!(grouped.len() - 1));
        details.insert("grouped_observed_counts".to_string(), json!(grouped.observed));
        details.insert("grouped_expected_counts".to_string(), json!(grouped.expected));
        details.insert("expected_counts".to_string(), json!(input.expected));

        Ok(FitOutcome {
            statistic: result.statistic,
            p_value: result.p_value,
            details,
        })
    }
}
