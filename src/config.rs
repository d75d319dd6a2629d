//! Estimator configuration.
//!
//! The configuration is small and serializable so it can be loaded from JSON
//! or (with the `toml` feature) TOML alongside the rest of an application's
//! settings.

use crate::error::{GridKdeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How per-point work is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingMode {
    /// One thread, points processed in input order
    #[default]
    Sequential,
    /// Points split across the rayon thread pool (requires the `parallel` feature)
    Parallel,
}

/// Estimator configuration.
///
/// # Example
///
/// ```rust
/// use gridkde::{EstimatorConfig, ProcessingMode};
///
/// let config = EstimatorConfig::default();
/// assert_eq!(config.processing_mode, ProcessingMode::Sequential);
///
/// let json = r#"{
///     "processing_mode": "parallel",
///     "parallel_min_points": 256
/// }"#;
/// let config = EstimatorConfig::from_json_str(json).unwrap();
/// assert_eq!(config.parallel_min_points, 256);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    #[serde(default)]
    pub processing_mode: ProcessingMode,

    /// Inputs smaller than this always run sequentially, even in parallel mode.
    #[serde(default = "EstimatorConfig::default_parallel_min_points")]
    pub parallel_min_points: usize,
}

impl EstimatorConfig {
    const fn default_parallel_min_points() -> usize {
        1024
    }

    pub fn with_processing_mode(mut self, mode: ProcessingMode) -> Self {
        self.processing_mode = mode;
        self
    }

    pub fn with_parallel_min_points(mut self, min_points: usize) -> Self {
        self.parallel_min_points = min_points;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.parallel_min_points == 0 {
            return Err(GridKdeError::InvalidConfig(
                "parallel_min_points must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML configuration.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file, choosing the format from its extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            #[cfg(feature = "toml")]
            Some("toml") => Self::from_toml_str(&contents),
            other => Err(GridKdeError::InvalidConfig(format!(
                "unsupported configuration format: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            processing_mode: ProcessingMode::default(),
            parallel_min_points: Self::default_parallel_min_points(),
        }
    }
}
