//! Delta-correlating prefetch predictor.
//!
//! This module contains the predictor and its building blocks, leaf first:
//! 1. **History Entry:** Per-instruction last address, last prefetch, and delta FIFO.
//! 2. **Entry Table:** FIFO arena of history entries keyed by instruction address.
//! 3. **In-Flight Set:** FIFO of outstanding prefetch addresses shared by all entries.
//! 4. **Correlator:** Matches the latest delta pair against history and replays what followed.
//! 5. **Filter:** Drops candidates that are in flight, cached, or queued.
//! 6. **Controller:** The `initialize` / `on_access` / `on_complete` entry points.

/// Entry points wiring the table, correlator, and filter together.
pub mod controller;

/// Delta pattern matching and candidate projection.
pub mod correlator;

/// Per-instruction history entries and delta FIFOs.
pub mod entry;

/// Candidate filtering against in-flight, cached, and queued addresses.
pub mod filter;

/// Outstanding prefetch tracking.
pub mod in_flight;

/// FIFO table of history entries.
pub mod table;

/// Host memory-system interface.
pub mod traits;

pub use self::controller::DcptPrefetcher;
pub use self::correlator::correlate;
pub use self::entry::{DeltaHistory, DeltaUpdate, HistoryEntry};
pub use self::filter::{FilterOutcome, filter};
pub use self::in_flight::InFlightSet;
pub use self::table::EntryTable;
pub use self::traits::MemoryInterface;
