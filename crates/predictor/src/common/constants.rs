//! Predictor Geometry Constants.
//!
//! This module defines the fixed sizes of every predictor structure. It includes:
//! 1. **Table Constants:** Capacity of the per-instruction entry table.
//! 2. **In-Flight Constants:** Capacity of the outstanding prefetch tracker.
//! 3. **Delta Constants:** History depth and encoded width of a single delta.
//!
//! These are fixed at compile time and are not part of [`Config`](crate::Config).

/// Maximum number of instructions tracked by the entry table.
pub const ENTRY_TABLE_CAPACITY: usize = 100;

/// Maximum number of prefetch requests remembered as outstanding.
pub const IN_FLIGHT_CAPACITY: usize = 32;

/// Number of deltas kept per history entry.
pub const DELTA_HISTORY_CAPACITY: usize = 6;

/// Width in bits of an encoded delta, sign included.
pub const DELTA_BITS: u32 = 10;

/// Largest delta magnitude representable in [`DELTA_BITS`] signed bits (511).
pub const DELTA_MAX: i64 = (1 << (DELTA_BITS - 1)) - 1;

/// Delta value seeded into a freshly created history entry.
pub const SEED_DELTA: i16 = 1;
