//! Configuration for the predictor and its replay harness.
//!
//! This module defines the runtime-tunable parameters. It provides:
//! 1. **Defaults:** Baseline block size and reference-host timing.
//! 2. **Structures:** Predictor settings and reference-host settings.
//! 3. **Validation:** Rejecting block sizes that cannot be quantized.
//!
//! Structure capacities are compile-time constants (see [`crate::common::constants`]);
//! only the block size and host model are configured here. Configuration is supplied
//! as JSON or taken from `Config::default()`.

use serde::{Deserialize, Serialize};

use crate::common::ConfigError;

/// Default configuration constants.
mod defaults {
    /// Default cache block size in bytes (64 bytes).
    pub const BLOCK_SIZE: u64 = 64;

    /// Default latency, in observed accesses, before an issued fetch completes.
    pub const FETCH_LATENCY: u64 = 4;

    /// Default number of miss-status-holding registers in the reference host.
    pub const MSHR_ENTRIES: usize = 16;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use dcpt_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.predictor.block_size, 64);
/// assert!(!config.predictor.trace_predictions);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use dcpt_core::config::Config;
///
/// let json = r#"{
///     "predictor": { "block_size": 128, "trace_predictions": true },
///     "host": { "fetch_latency": 10, "mshr_entries": 8 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.predictor.block_size, 128);
/// assert_eq!(config.host.mshr_entries, 8);
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Predictor settings
    #[serde(default)]
    pub predictor: PredictorConfig,
    /// Reference host (cache + MSHR model) settings
    #[serde(default)]
    pub host: HostConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed JSON, or the first validation
    /// failure reported by [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every section for values the predictor cannot operate with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBlockSize`] or [`ConfigError::InvalidMshrEntries`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.predictor.validate()?;
        self.host.validate()
    }
}

/// Predictor settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PredictorConfig {
    /// Cache block size in bytes. Deltas are quantized in `block_size / 2` units and
    /// projected in `block_size` units.
    #[serde(default = "PredictorConfig::default_block_size")]
    pub block_size: u64,

    /// Log every correlation and filter decision at `debug` level.
    #[serde(default)]
    pub trace_predictions: bool,
}

impl PredictorConfig {
    fn default_block_size() -> u64 {
        defaults::BLOCK_SIZE
    }

    /// Validates the block size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBlockSize`] unless the block size is a power of
    /// two of at least 2 bytes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_block_size(self.block_size)
    }
}

/// Block sizes must be powers of two of at least 2 bytes: deltas are measured in
/// half blocks and the host masks addresses with `block_size - 1`.
pub(crate) fn check_block_size(block_size: u64) -> Result<(), ConfigError> {
    if block_size < 2 || !block_size.is_power_of_two() {
        return Err(ConfigError::InvalidBlockSize(block_size));
    }
    Ok(())
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            block_size: defaults::BLOCK_SIZE,
            trace_predictions: false,
        }
    }
}

/// Reference host settings used by the trace replay harness.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostConfig {
    /// Number of subsequent accesses after which an issued fetch completes.
    #[serde(default = "HostConfig::default_fetch_latency")]
    pub fetch_latency: u64,

    /// Maximum number of fetches outstanding in the MSHR queue.
    #[serde(default = "HostConfig::default_mshr_entries")]
    pub mshr_entries: usize,
}

impl HostConfig {
    fn default_fetch_latency() -> u64 {
        defaults::FETCH_LATENCY
    }

    fn default_mshr_entries() -> usize {
        defaults::MSHR_ENTRIES
    }

    /// Validates the MSHR capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMshrEntries`] when `mshr_entries` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mshr_entries == 0 {
            return Err(ConfigError::InvalidMshrEntries);
        }
        Ok(())
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            fetch_latency: defaults::FETCH_LATENCY,
            mshr_entries: defaults::MSHR_ENTRIES,
        }
    }
}
