//! Configuration management for the qubih CLI.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with QUBIH_ prefix)
//! 3. .env files
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line flags
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Numerical settings for evolution and output
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Sampling settings for the measure command
    #[serde(default)]
    pub measurement: MeasurementConfig,
}

/// Numerical settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// ħ used by the exponential solver
    #[serde(default = "default_hbar")]
    pub reduced_planck_constant: f64,

    /// Amplitudes below this magnitude are hidden in table output
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

/// Measurement sampling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementConfig {
    /// Fixed RNG seed; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Number of shots
    #[serde(default = "default_shots")]
    pub shots: u32,
}

fn default_hbar() -> f64 {
    1.0
}

fn default_tolerance() -> f64 {
    1e-10
}

fn default_shots() -> u32 {
    1024
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            reduced_planck_constant: default_hbar(),
            tolerance: default_tolerance(),
        }
    }
}

impl Default for MeasurementConfig {
    fn default() -> Self {
        MeasurementConfig {
            seed: None,
            shots: default_shots(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_yaml(&contents)
    }

    /// Parse and validate configuration from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml_ng::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load .env file if it exists
    /// 2. Load from file if provided
    /// 3. Apply environment variable overrides
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };

        let config = config.merge_env(|key| std::env::var(key).ok())?;

        config.validate()?;
        Ok(config)
    }

    /// Merge environment variables into this configuration.
    ///
    /// Only variables that are set override the file-loaded (or default)
    /// values. A set but unparsable variable is an error.
    fn merge_env<F>(mut self, var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = var("QUBIH_HBAR") {
            self.simulation.reduced_planck_constant = parse_var("QUBIH_HBAR", &v)?;
        }
        if let Some(v) = var("QUBIH_TOLERANCE") {
            self.simulation.tolerance = parse_var("QUBIH_TOLERANCE", &v)?;
        }
        if let Some(v) = var("QUBIH_SEED") {
            self.measurement.seed = Some(parse_var("QUBIH_SEED", &v)?);
        }
        if let Some(v) = var("QUBIH_SHOTS") {
            self.measurement.shots = parse_var("QUBIH_SHOTS", &v)?;
        }

        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let hbar = self.simulation.reduced_planck_constant;
        if !hbar.is_finite() || hbar <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "reduced_planck_constant must be finite and positive, got {hbar}"
            )));
        }

        let tol = self.simulation.tolerance;
        if !tol.is_finite() || tol < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "tolerance must be finite and non-negative, got {tol}"
            )));
        }

        if self.measurement.shots == 0 {
            return Err(ConfigError::ValidationError(
                "shots must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::ParseError(format!("{key}={value}: {e}")))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
