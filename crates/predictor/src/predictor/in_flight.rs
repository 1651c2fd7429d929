//! In-Flight Set.
//!
//! Remembers which prefetch targets have been requested but not yet reported
//! complete, so the filter does not request the same address twice. The set is
//! shared by all history entries.
//!
//! Overflow evicts the oldest outstanding address; that request is treated as
//! abandoned. Completions for addresses no longer tracked are ignored.

use std::collections::VecDeque;

use crate::common::constants::IN_FLIGHT_CAPACITY;

/// Bounded FIFO of outstanding prefetch addresses.
#[derive(Clone, Debug)]
pub struct InFlightSet {
    pending: VecDeque<u64>,
}

impl Default for InFlightSet {
    fn default() -> Self {
        Self::new()
    }
}

impl InFlightSet {
    /// Creates an empty set with storage for [`IN_FLIGHT_CAPACITY`] addresses.
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(IN_FLIGHT_CAPACITY),
        }
    }

    /// Forgets every outstanding address.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Number of outstanding addresses.
    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if nothing is outstanding.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Returns `true` if `addr` is outstanding.
    pub fn contains(&self, addr: u64) -> bool {
        self.pending.contains(&addr)
    }

    /// Records `addr` as outstanding, evicting the oldest address when full.
    ///
    /// # Returns
    ///
    /// The abandoned address, if an eviction took place.
    pub fn insert(&mut self, addr: u64) -> Option<u64> {
        let evicted = if self.pending.len() == IN_FLIGHT_CAPACITY {
            self.pending.pop_front()
        } else {
            None
        };
        self.pending.push_back(addr);
        evicted
    }

    /// Removes the first occurrence of `addr`.
    ///
    /// # Returns
    ///
    /// `true` if `addr` was tracked, `false` if the call was a no-op.
    pub fn complete(&mut self, addr: u64) -> bool {
        match self.pending.iter().position(|&a| a == addr) {
            Some(i) => self.pending.remove(i).is_some(),
            None => false,
        }
    }

    /// Iterates over outstanding addresses, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.pending.iter().copied()
    }
}
