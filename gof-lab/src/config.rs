use anyhow::Result;
use config::{Config as ConfigLoader, Environment, File};
use gof_api::observability::LogConfig;
use gof_core::AnalysisSettings;
use serde::Deserialize;
use std::path::Path;

pub const ENV_PREFIX: &str = "GOF_LAB";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory holding the built front-end, served for every non-API path
    pub static_dir: String,
    pub log: LogConfig,
    pub analysis: AnalysisSettings,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from("config")
    }

    /// Layers `<dir>/default`, `<dir>/local` and `GOF_LAB_*` environment
    /// variables (nested keys separated by `__`), then validates the result.
    pub fn load_from(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let config = ConfigLoader::builder()
            .add_source(File::from(dir.join("default")).required(false))
            .add_source(File::from(dir.join("local")).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validated()
    }

    pub fn validated(mut self) -> Result<Self> {
        self.analysis = self.analysis.validated()?;
        Ok(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            static_dir: "frontend/dist".to_string(),
            log: LogConfig::default(),
            analysis: AnalysisSettings::default(),
        }
    }
}
