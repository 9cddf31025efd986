use gof_core::{CoreError, DistributionSpec, PoissonBinOrigin, Result};

use crate::model::TheoreticalModel;

/// Allocates theoretical probability mass to a fixed number of ordered bins.
///
/// Poisson bins are point masses at their event count (see
/// [`PoissonBinOrigin`]) except the last bin, which takes the whole upper tail.
/// Normal bin `i` covers `(i - 0.5, i + 0.5]`, with the first bin extended
/// down to -inf and the last up to +inf.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpectedFrequencyGenerator {
    pub origin: PoissonBinOrigin,
}

impl ExpectedFrequencyGenerator {
    pub fn new(origin: PoissonBinOrigin) -> Self {
        Self { origin }
    }

    /// Probability per bin, normalized to sum to 1.
    pub fn probabilities(&self, spec: &DistributionSpec, num_bins: usize) -> Result<Vec<f64>> {
        if num_bins == 0 {
            return Err(CoreError::Validation("number of bins must be at least 1".to_string()));
        }

        let model = TheoreticalModel::new(spec)?;
        let raw = match spec {
            DistributionSpec::Poisson { .. } => self.poisson_masses(&model, num_bins),
            DistributionSpec::Normal { .. } => normal_masses(&model, num_bins),
        };

        let total: f64 = raw.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(CoreError::ZeroMass(spec.display_name().to_string()));
        }

        Ok(raw.into_iter().map(|p| p / total).collect())
    }

    /// Expected count per bin, summing to `total_observed`.
    pub fn counts(&self, spec: &DistributionSpec, num_bins: usize, total_observed: u64) -> Result<Vec<f64>> {
        let total = total_observed as f64;
        Ok(self
            .probabilities(spec, num_bins)?
            .into_iter()
            .map(|p| p * total)
            .collect())
    }

    fn poisson_masses(&self, model: &TheoreticalModel, num_bins: usize) -> Vec<f64> {
        if num_bins == 1 {
            return vec![1.0];
        }

        (1..=num_bins)
            .map(|bin| {
                let count = self.origin.event_count(bin) as f64;
                if bin == num_bins {
                    model.sf(count - 1.0)
                } else {
                    model.density(count)
                }
            })
            .collect()
    }
}

fn normal_masses(model: &TheoreticalModel, num_bins: usize) -> Vec<f64> {
    if num_bins == 1 {
        return vec![1.0];
    }

    let mut masses = Vec::with_capacity(num_bins);
    let mut previous_cdf = 0.0;
    for bin in 1..num_bins {
        let upper = bin as f64 + 0.5;
        let cdf = model.cdf(upper);
        masses.push(cdf - previous_cdf);
        previous_cdf = cdf;
    }
    masses.push(model.sf(num_bins as f64 - 0.5));
    masses
}
