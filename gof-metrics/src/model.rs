use gof_core::{CoreError, DistributionSpec, Result};
use statrs::distribution::{Continuous, ContinuousCDF, Discrete, DiscreteCDF, Normal, Poisson};

/// A [`DistributionSpec`] bound to its statrs implementation.
#[derive(Debug, Clone, Copy)]
pub enum TheoreticalModel {
    Poisson(Poisson),
    Normal(Normal),
}

impl TheoreticalModel {
    pub fn new(spec: &DistributionSpec) -> Result<Self> {
        match *spec {
            DistributionSpec::Poisson { lambda } => Poisson::new(lambda)
                .map(TheoreticalModel::Poisson)
                .map_err(|e| CoreError::invalid_parameter("Poisson", e.to_string())),
            DistributionSpec::Normal { mean, std_dev } => Normal::new(mean, std_dev)
                .map(TheoreticalModel::Normal)
                .map_err(|e| CoreError::invalid_parameter("Normal", e.to_string())),
        }
    }

    /// P(X <= x). The Poisson CDF is a step function over the reals.
    pub fn cdf(&self, x: f64) -> f64 {
        match self {
            TheoreticalModel::Poisson(d) => {
                if x < 0.0 {
                    0.0
                } else {
                    d.cdf(x.floor() as u64)
                }
            }
            TheoreticalModel::Normal(d) => d.cdf(x),
        }
    }

    /// P(X > x), computed directly for tail precision.
    pub fn sf(&self, x: f64) -> f64 {
        match self {
            TheoreticalModel::Poisson(d) => {
                if x < 0.0 {
                    1.0
                } else {
                    d.sf(x.floor() as u64)
                }
            }
            TheoreticalModel::Normal(d) => d.sf(x),
        }
    }

    /// Point mass for Poisson, density for Normal.
    pub fn density(&self, x: f64) -> f64 {
        match self {
            TheoreticalModel::Poisson(d) => {
                if x < 0.0 || x.fract() != 0.0 {
                    0.0
                } else {
                    d.pmf(x as u64)
                }
            }
            TheoreticalModel::Normal(d) => d.pdf(x),
        }
    }
}
