use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::{CoreError, Result};

// ===== Distribution and Test Kinds =====

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DistributionKind {
    Poisson,
    Normal,
}

impl DistributionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistributionKind::Poisson => "poisson",
            DistributionKind::Normal => "normal",
        }
    }

    /// Capitalized name used in human-readable conclusions.
    pub fn display_name(&self) -> &'static str {
        match self {
            DistributionKind::Poisson => "Poisson",
            DistributionKind::Normal => "Normal",
        }
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistributionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "poisson" => Ok(DistributionKind::Poisson),
            "normal" => Ok(DistributionKind::Normal),
            other => Err(CoreError::UnsupportedType(format!(
                "Unsupported distribution type: '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    ChiSquare,
    KolmogorovSmirnov,
}

impl TestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestKind::ChiSquare => "chi_square",
            TestKind::KolmogorovSmirnov => "kolmogorov_smirnov",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TestKind::ChiSquare => "Chi-square",
            TestKind::KolmogorovSmirnov => "Kolmogorov-Smirnov",
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "chi_square" => Ok(TestKind::ChiSquare),
            "kolmogorov_smirnov" => Ok(TestKind::KolmogorovSmirnov),
            other => Err(CoreError::UnsupportedType(format!(
                "Unsupported test type: '{}'",
                other
            ))),
        }
    }
}

// ===== Raw Parameters =====

/// A numeric parameter as it arrives from a client: either a JSON number or a
/// numeric string such as `"2.5"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ParameterValue {
    Number(f64),
    Text(String),
}

impl ParameterValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParameterValue::Number(n) => Some(*n),
            ParameterValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Number(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::Text(value.to_string())
    }
}

/// Unvalidated distribution parameters shared by every request shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DistributionParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lambda: Option<ParameterValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<ParameterValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std_dev: Option<ParameterValue>,
}

impl DistributionParameters {
    pub fn poisson(lambda: impl Into<ParameterValue>) -> Self {
        Self {
            lambda: Some(lambda.into()),
            ..Self::default()
        }
    }

    pub fn normal(mean: impl Into<ParameterValue>, std_dev: impl Into<ParameterValue>) -> Self {
        Self {
            mean: Some(mean.into()),
            std_dev: Some(std_dev.into()),
            ..Self::default()
        }
    }

    /// Resolve the parameters required by `kind` into a validated [`DistributionSpec`].
    pub fn resolve(&self, kind: DistributionKind) -> Result<DistributionSpec> {
        let name = kind.display_name();
        match kind {
            DistributionKind::Poisson => {
                let lambda = required(name, "lambda", self.lambda.as_ref())?;
                DistributionSpec::poisson(lambda)
            }
            DistributionKind::Normal => {
                let mean = required(name, "mean", self.mean.as_ref())?;
                let std_dev = required(name, "stdDev", self.std_dev.as_ref())?;
                DistributionSpec::normal(mean, std_dev)
            }
        }
    }
}

fn required(distribution: &str, field: &str, value: Option<&ParameterValue>) -> Result<f64> {
    let value = value.ok_or_else(|| {
        CoreError::invalid_parameter(distribution, format!("{} was not provided", field))
    })?;

    value.as_f64().ok_or_else(|| {
        CoreError::invalid_parameter(distribution, format!("{} is not a number", field))
    })
}

// ===== Validated Distribution =====

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(tag = "distributionType", rename_all = "lowercase")]
pub enum DistributionSpec {
    Poisson {
        lambda: f64,
    },
    Normal {
        mean: f64,
        #[serde(rename = "stdDev")]
        std_dev: f64,
    },
}

impl DistributionSpec {
    pub fn poisson(lambda: f64) -> Result<Self> {
        if !lambda.is_finite() || lambda <= 0.0 {
            return Err(CoreError::invalid_parameter(
                "Poisson",
                "lambda must be a positive finite number",
            ));
        }
        Ok(DistributionSpec::Poisson { lambda })
    }

    pub fn normal(mean: f64, std_dev: f64) -> Result<Self> {
        if !mean.is_finite() {
            return Err(CoreError::invalid_parameter("Normal", "mean must be a finite number"));
        }
        if !std_dev.is_finite() || std_dev <= 0.0 {
            return Err(CoreError::invalid_parameter(
                "Normal",
                "stdDev must be a positive finite number",
            ));
        }
        Ok(DistributionSpec::Normal { mean, std_dev })
    }

    pub fn kind(&self) -> DistributionKind {
        match self {
            DistributionSpec::Poisson { .. } => DistributionKind::Poisson,
            DistributionSpec::Normal { .. } => DistributionKind::Normal,
        }
    }

    pub fn display_name(&self) -> &'static str {
        self.kind().display_name()
    }
}
