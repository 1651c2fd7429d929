//! Common utilities and types used throughout the predictor.
//!
//! This module provides the building blocks shared by the predictor, the replay
//! harness, and the CLI. It includes:
//! 1. **Constants:** Fixed capacities of the entry table, in-flight set, and delta history.
//! 2. **Delta Type:** The quantized, saturating stride unit stored per entry.
//! 3. **Error Handling:** Configuration and trace-loading error types.

/// Fixed predictor geometry.
pub mod constants;

/// Quantized delta type.
pub mod delta;

/// Error types for configuration and trace loading.
pub mod error;

pub use constants::{
    DELTA_BITS, DELTA_HISTORY_CAPACITY, DELTA_MAX, ENTRY_TABLE_CAPACITY, IN_FLIGHT_CAPACITY,
};
pub use delta::Delta;
pub use error::{ConfigError, TraceError};
