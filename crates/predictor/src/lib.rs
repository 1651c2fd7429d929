//! Delta-correlating prefetch predictor library.
//!
//! This crate implements a DCPT-style hardware data prefetcher with the following:
//! 1. **Predictor:** Per-instruction delta histories, bigram correlation, and candidate filtering.
//! 2. **Host Interface:** The [`MemoryInterface`] trait through which caches and MSHRs are queried.
//! 3. **Simulation:** Trace loading, a reference memory model, and a replay driver.
//! 4. **Configuration & Statistics:** JSON configuration and run counters.
//!
//! # Examples
//!
//! ```
//! use dcpt_core::{DcptPrefetcher, MemoryInterface};
//!
//! #[derive(Default)]
//! struct Recorder(Vec<u64>);
//!
//! impl MemoryInterface for Recorder {
//!     fn is_cached(&self, _addr: u64) -> bool { false }
//!     fn is_queued(&self, _addr: u64) -> bool { false }
//!     fn issue_fetch(&mut self, addr: u64) { self.0.push(addr); }
//! }
//!
//! let mut pf = DcptPrefetcher::with_block_size(64).unwrap();
//! let mut host = Recorder::default();
//! pf.initialize();
//! for i in 0..4 {
//!     pf.on_access(&mut host, 0x400, 1000 + i * 4 * 64);
//! }
//! assert_eq!(host.0, vec![1000 + 12 * 64 + 8 * 64]);
//! ```

/// Common types and constants (capacities, deltas, errors).
pub mod common;
/// Predictor and reference-host configuration.
pub mod config;
/// The predictor: history entries, table, correlator, filter, controller.
pub mod predictor;
/// Trace loading, reference host, and replay driver.
pub mod sim;
/// Predictor statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// The predictor; construct with `DcptPrefetcher::new` and call `initialize` first.
pub use crate::predictor::DcptPrefetcher;
/// Host memory-system interface implemented by the driver.
pub use crate::predictor::MemoryInterface;
