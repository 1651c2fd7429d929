//! Per-Instruction History Entry.
//!
//! A history entry records what one load/store instruction has done so far:
//! the last address it touched, the last address it caused to be prefetched,
//! and a short FIFO of quantized deltas between its consecutive accesses.
//!
//! # Performance
//!
//! - **Time Complexity:** `record()` is O(D) where D is the history depth (6).
//! - **Space Complexity:** Fixed; the delta history is an inline array, no heap allocation.

use crate::common::constants::{DELTA_HISTORY_CAPACITY, SEED_DELTA};
use crate::common::Delta;

/// Bounded, oldest-first FIFO of quantized deltas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeltaHistory {
    /// Backing storage; only the first `len` slots are live.
    buf: [Delta; DELTA_HISTORY_CAPACITY],
    /// Number of live deltas.
    len: usize,
}

impl DeltaHistory {
    /// Creates an empty history.
    pub const fn new() -> Self {
        Self {
            buf: [Delta::SENTINEL; DELTA_HISTORY_CAPACITY],
            len: 0,
        }
    }

    /// Appends a delta, dropping the oldest one when the history is full.
    ///
    /// # Returns
    ///
    /// The evicted delta, if the history was already at capacity.
    pub fn push(&mut self, delta: Delta) -> Option<Delta> {
        if self.len < DELTA_HISTORY_CAPACITY {
            self.buf[self.len] = delta;
            self.len += 1;
            return None;
        }

        let evicted = self.buf[0];
        self.buf.copy_within(1.., 0);
        self.buf[DELTA_HISTORY_CAPACITY - 1] = delta;
        Some(evicted)
    }

    /// Returns the live deltas, oldest first.
    #[inline]
    pub fn as_slice(&self) -> &[Delta] {
        &self.buf[..self.len]
    }

    /// Returns the number of recorded deltas.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no delta has been recorded.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the query bigram `(second most recent, most recent)`.
    ///
    /// `None` when fewer than two deltas are present.
    pub fn last_pair(&self) -> Option<(Delta, Delta)> {
        match self.as_slice() {
            [.., last2, last1] => Some((*last2, *last1)),
            _ => None,
        }
    }

    /// Iterates over the deltas, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = Delta> + '_ {
        self.as_slice().iter().copied()
    }
}

/// Outcome of feeding one observed address into an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeltaUpdate {
    /// The address moved less than half a block; nothing was recorded.
    Unchanged,
    /// A nonzero delta was appended.
    Recorded {
        /// The encoded delta as stored.
        delta: Delta,
        /// Whether the raw difference was out of range and stored as the sentinel.
        clamped: bool,
    },
}

/// Tracking state for one instruction address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pc: u64,
    last_address: u64,
    last_prefetched: u64,
    deltas: DeltaHistory,
}

impl HistoryEntry {
    /// Creates an entry for the first observed access of `pc`.
    ///
    /// The history is seeded with a single delta of 1 so that correlation can be
    /// attempted from the second access onward.
    pub fn new(pc: u64, addr: u64) -> Self {
        let mut deltas = DeltaHistory::new();
        let _ = deltas.push(Delta::from(SEED_DELTA));
        Self {
            pc,
            last_address: addr,
            last_prefetched: 0,
            deltas,
        }
    }

    /// Builds an entry with an explicit delta history (oldest first).
    ///
    /// Deltas beyond the history capacity push out the oldest ones, exactly as
    /// repeated [`HistoryEntry::record`] calls would.
    pub fn from_parts(pc: u64, last_address: u64, deltas: &[Delta]) -> Self {
        let mut history = DeltaHistory::new();
        for &delta in deltas {
            let _ = history.push(delta);
        }
        Self {
            pc,
            last_address,
            last_prefetched: 0,
            deltas: history,
        }
    }

    /// Instruction address this entry tracks.
    #[inline]
    pub const fn pc(&self) -> u64 {
        self.pc
    }

    /// Most recent address observed for this instruction.
    #[inline]
    pub const fn last_address(&self) -> u64 {
        self.last_address
    }

    /// Most recent address this entry caused to be prefetched (0 if none).
    #[inline]
    pub const fn last_prefetched(&self) -> u64 {
        self.last_prefetched
    }

    /// Recorded delta history.
    #[inline]
    pub const fn deltas(&self) -> &DeltaHistory {
        &self.deltas
    }

    pub(crate) const fn set_last_prefetched(&mut self, addr: u64) {
        self.last_prefetched = addr;
    }

    /// Feeds a newly observed address into the delta history.
    ///
    /// A zero quantized difference leaves the entry untouched, including
    /// `last_address`. Otherwise the (possibly saturated) delta is appended and
    /// `last_address` advances to `addr`.
    pub fn record(&mut self, addr: u64, block_size: u64) -> DeltaUpdate {
        let raw = Delta::raw_between(self.last_address, addr, block_size);
        if raw == 0 {
            return DeltaUpdate::Unchanged;
        }

        let delta = Delta::encode(raw);
        let _ = self.deltas.push(delta);
        self.last_address = addr;
        DeltaUpdate::Recorded {
            delta,
            clamped: !Delta::fits(raw),
        }
    }
}
