//! Error definitions.
//!
//! The predictor's own entry points never fail: every anomaly is absorbed by a
//! silent policy (saturation, FIFO eviction, ignored completions). Errors exist only
//! at the edges of the crate:
//! 1. **Configuration:** Malformed JSON or a block size that cannot be quantized.
//! 2. **Trace Loading:** I/O failures and unparsable trace lines.

use thiserror::Error;

/// Errors produced while parsing or validating a [`Config`](crate::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be deserialized.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The block size is not a power of two of at least 2 bytes.
    ///
    /// Deltas are quantized in units of `block_size / 2`, which must be nonzero.
    #[error("block size must be a power of two >= 2, got {0}")]
    InvalidBlockSize(u64),

    /// The reference host was configured without any MSHR slots.
    #[error("host must have at least one MSHR entry")]
    InvalidMshrEntries,
}

/// Errors produced while reading an access trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace file could not be read.
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    /// A line of the trace is not a `<pc> <addr>` pair.
    #[error("line {line}: {reason}")]
    Parse {
        /// 1-based line number of the offending line.
        line: usize,
        /// Human-readable description of the problem.
        reason: String,
    },
}
