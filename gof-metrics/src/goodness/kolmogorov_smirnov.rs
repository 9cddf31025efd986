use gof_core::{
    round_to, CoreError, DistributionSpec, FitInput, FitOutcome, GoodnessOfFitTest, ObservedSeries,
    PoissonBinOrigin, Result, TestKind,
};
use serde_json::{json, Map};

use crate::{model::TheoreticalModel, statistical::StatisticalAnalyzer};

/// One-sample Kolmogorov-Smirnov test on the observations implied by the bins.
#[derive(Debug, Clone, Copy)]
pub struct KolmogorovSmirnovTest {
    pub origin: PoissonBinOrigin,
    pub max_observations: u64,
    pub exact_max_sample: u64,
}

impl Default for KolmogorovSmirnovTest {
    fn default() -> Self {
        Self {
            origin: PoissonBinOrigin::default(),
            max_observations: 100_000,
            exact_max_sample: 1_000,
        }
    }
}

impl KolmogorovSmirnovTest {
    /// Value a single observation from `bin` takes on the distribution's axis.
    pub fn bin_value(&self, spec: &DistributionSpec, bin: usize) -> f64 {
        match spec {
            DistributionSpec::Poisson { .. } => self.origin.event_count(bin) as f64,
            DistributionSpec::Normal { .. } => bin as f64,
        }
    }

    /// Theoretical CDF at the upper edge of `bin`.
    fn bin_cdf(&self, model: &TheoreticalModel, spec: &DistributionSpec, bin: usize) -> f64 {
        match spec {
            DistributionSpec::Poisson { .. } => model.cdf(self.origin.event_count(bin) as f64),
            DistributionSpec::Normal { .. } => model.cdf(bin as f64 + 0.5).clamp(0.0, 1.0),
        }
    }

    /// Max absolute gap between the binned empirical CDF and the theoretical CDF.
    pub fn binned_d_statistic(&self, series: &ObservedSeries, spec: &DistributionSpec) -> Result<f64> {
        let model = TheoreticalModel::new(spec)?;
        let total = series.total() as f64;

        let mut running = 0u64;
        let (empirical, theoretical): (Vec<f64>, Vec<f64>) = series
            .bins()
            .map(|(bin, count)| {
                running += count;
                (running as f64 / total, self.bin_cdf(&model, spec, bin))
            })
            .unzip();

        Ok(StatisticalAnalyzer::max_cdf_distance(&empirical, &theoretical))
    }
}

/// Expand binned counts into individual observations: bin `i` repeated
/// `observed[i]` times, in bin order.
pub fn synthetic_sample(series: &ObservedSeries, max_observations: u64) -> Result<Vec<usize>> {
    let total = series.total();
    if total > max_observations {
        return Err(CoreError::Computation(format!(
            "sample of {} observations exceeds the limit of {}",
            total, max_observations
        )));
    }

    let mut sample = Vec::with_capacity(total as usize);
    for (bin, count) in series.bins() {
        sample.extend(std::iter::repeat(bin).take(count as usize));
    }
    Ok(sample)
}

impl GoodnessOfFitTest for KolmogorovSmirnovTest {
    fn kind(&self) -> TestKind {
        TestKind::KolmogorovSmirnov
    }

    fn run(&self, input: &FitInput<'_>) -> Result<FitOutcome> {
        let spec = input.spec;
        let model = TheoreticalModel::new(spec)?;

        let sample: Vec<f64> = synthetic_sample(input.series, self.max_observations)?
            .into_iter()
            .map(|bin| self.bin_value(spec, bin))
            .collect();

        let result =
            StatisticalAnalyzer::ks_one_sample(&sample, |x| model.cdf(x), self.exact_max_sample)?;
        let d_statistic = self.binned_d_statistic(input.series, spec)?;

        let mut details = Map::new();
        details.insert("d_statistic".to_string(), json!(round_to(d_statistic, 4)));
        details.insert("sample_size".to_string(), json!(sample.len()));

        Ok(FitOutcome {
            statistic: result.statistic,
            p_value: result.p_value,
            details,
        })
    }
}
