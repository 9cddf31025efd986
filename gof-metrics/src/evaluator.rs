use gof_core::{AnalysisSettings, CoreError, DistributionSpec, Result};
use serde::{Deserialize, Serialize};

use crate::model::TheoreticalModel;

/// Chart-ready curve: one label per evaluated point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DistributionCurve {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl DistributionCurve {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn total_mass(&self) -> f64 {
        self.values.iter().sum()
    }
}

#[derive(Debug, Clone)]
pub struct DistributionEvaluator {
    pub normal_points: usize,
    pub poisson_min_k: u64,
    pub max_points: usize,
}

impl DistributionEvaluator {
    pub fn new(settings: &AnalysisSettings) -> Self {
        Self {
            normal_points: settings.normal_curve_points,
            poisson_min_k: settings.poisson_curve_min_k,
            max_points: settings.max_curve_points,
        }
    }

    pub fn evaluate(&self, spec: &DistributionSpec) -> Result<DistributionCurve> {
        let model = TheoreticalModel::new(spec)?;
        let curve = match *spec {
            DistributionSpec::Poisson { lambda } => self.poisson_curve(&model, lambda)?,
            DistributionSpec::Normal { mean, std_dev } => self.normal_curve(&model, mean, std_dev),
        };

        tracing::debug!(
            distribution = %spec.kind(),
            points = curve.len(),
            "Evaluated distribution curve"
        );
        Ok(curve)
    }

    /// Largest k plotted for a Poisson curve; wide enough to show the right tail.
    pub fn poisson_max_k(&self, lambda: f64) -> u64 {
        let tail = ((3.0 * lambda).ceil() as u64).saturating_add(2);
        self.poisson_min_k.max(tail)
    }

    fn poisson_curve(&self, model: &TheoreticalModel, lambda: f64) -> Result<DistributionCurve> {
        let max_k = self.poisson_max_k(lambda);
        if max_k >= self.max_points as u64 {
            return Err(CoreError::invalid_parameter(
                "Poisson",
                format!("lambda {} needs more than {} points to chart", lambda, self.max_points),
            ));
        }

        let (labels, values) = (0..=max_k)
            .map(|k| (k.to_string(), model.density(k as f64)))
            .unzip();
        Ok(DistributionCurve { labels, values })
    }

    fn normal_curve(&self, model: &TheoreticalModel, mean: f64, std_dev: f64) -> DistributionCurve {
        let min_x = mean - 4.0 * std_dev;
        let max_x = mean + 4.0 * std_dev;
        let intervals = (self.normal_points.max(2) - 1) as f64;

        let (labels, values) = (0..self.normal_points.max(2))
            .map(|i| {
                let x = min_x + (max_x - min_x) * i as f64 / intervals;
                (format!("{:.2}", x), model.density(x))
            })
            .unzip();
        DistributionCurve { labels, values }
    }
}

impl Default for DistributionEvaluator {
    fn default() -> Self {
        Self::new(&AnalysisSettings::default())
    }
}
