use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use tracing::debug;

use crate::domain::error::Result;
use crate::domain::table::AnalysisConfig;

const DEFAULT_CONFIG_FILE: &str = "featurelens.toml";
const ENV_PREFIX: &str = "FEATURELENS_";

/// Layers defaults, an optional TOML file and `FEATURELENS_*` variables
pub struct ConfigService {
    path: PathBuf,
    read_env: bool,
}

impl ConfigService {
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            read_env: true,
        }
    }

    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = path.as_ref().to_path_buf();
        self
    }

    /// Ignore the process environment and `.env` (used by tests)
    pub fn without_env(mut self) -> Self {
        self.read_env = false;
        self
    }

    pub fn figment(&self) -> Figment {
        let figment = Figment::from(Serialized::defaults(AnalysisConfig::default()))
            .merge(Toml::file(&self.path));

        if self.read_env {
            figment.merge(Env::prefixed(ENV_PREFIX))
        } else {
            figment
        }
    }

    pub fn load(&self) -> Result<AnalysisConfig> {
        if self.read_env {
            // A missing .env file is the normal case
            let _ = dotenvy::dotenv();
        }

        let config: AnalysisConfig = self.figment().extract()?;
        config.ensure_valid()?;

        debug!(
            path = %self.path.display(),
            histogram_bins = config.histogram_bins,
            hex_radius = config.hex_radius,
            "Analysis configuration loaded"
        );
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
