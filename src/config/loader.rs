//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tenant settings
//! and the employee roster from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{EmployeeRoster, IncentiveConfig, IncentiveSettings, ThresholdTable};

/// Loads and provides access to incentive configuration.
///
/// # Directory Structure
///
/// ```text
/// config/service_center/
/// ├── settings.yaml   # Threshold overrides and store list
/// └── employees.yaml  # Employee roster
/// ```
///
/// # Example
///
/// ```no_run
/// use incentive_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/service_center").unwrap();
/// let thresholds = loader.effective_thresholds();
/// println!("{} positions configured", thresholds.len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: IncentiveConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing (`ConfigNotFound`), contains
    /// invalid YAML (`ConfigParseError`), or configures a non-monotonic
    /// threshold triple (`InvalidThresholds`).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use incentive_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/service_center")?;
    /// # Ok::<(), incentive_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<IncentiveSettings>(&path.join("settings.yaml"))?;
        let roster = Self::load_yaml::<EmployeeRoster>(&path.join("employees.yaml"))?;

        debug!(
            path = %path.display(),
            threshold_overrides = settings.thresholds.len(),
            employees = roster.employees.len(),
            "Loaded incentive configuration"
        );

        Ok(Self {
            config: IncentiveConfig::new(settings, roster)?,
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: IncentiveConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &IncentiveConfig {
        &self.config
    }

    /// Returns the tenant override table, if any overrides are configured.
    pub fn override_thresholds(&self) -> Option<&ThresholdTable> {
        self.config.settings().override_thresholds()
    }

    /// Returns the table a calculation would actually use per position.
    pub fn effective_thresholds(&self) -> ThresholdTable {
        self.config.settings().thresholds.overlaid_on_defaults()
    }
}
