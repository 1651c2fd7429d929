//! Trace-driven simulation harness.
//!
//! Provides a trace loader, a reference memory model implementing
//! [`MemoryInterface`](crate::predictor::MemoryInterface), and a driver that
//! replays a trace through the predictor.

/// Reference cache-residency and MSHR model.
pub mod host;

/// Access-by-access replay driver.
pub mod replay;

/// Text trace parsing.
pub mod trace;

pub use host::{HostStats, ReferenceHost};
pub use replay::{Replay, ReplayReport};
pub use trace::{Access, load_trace, parse_trace};
