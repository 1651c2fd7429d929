//! Entry Table.
//!
//! Holds the history entries of recently seen instructions in a preallocated
//! ring-buffer arena. Entries are value types stored inline; there is no
//! per-entry allocation.
//!
//! Eviction is FIFO on *creation* order: once the table is full, admitting a new
//! entry overwrites the slot of the oldest-created one, regardless of how recently
//! that entry was used. Lookup is a linear scan, which is adequate at this size.

use std::mem;

use super::entry::HistoryEntry;
use crate::common::constants::ENTRY_TABLE_CAPACITY;

/// Bounded FIFO collection of [`HistoryEntry`] keyed by instruction address.
#[derive(Clone, Debug)]
pub struct EntryTable {
    /// Arena of live entries; grows to capacity, then is overwritten in place.
    slots: Vec<HistoryEntry>,
    /// Slot holding the oldest-created entry once the arena is full.
    oldest: usize,
}

impl Default for EntryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryTable {
    /// Creates an empty table with storage for [`ENTRY_TABLE_CAPACITY`] entries.
    pub fn new() -> Self {
        Self {
            slots: Vec::with_capacity(ENTRY_TABLE_CAPACITY),
            oldest: 0,
        }
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.oldest = 0;
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the table holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns `true` if the next insertion will evict.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.slots.len() == ENTRY_TABLE_CAPACITY
    }

    fn position(&self, pc: u64) -> Option<usize> {
        self.slots.iter().position(|e| e.pc() == pc)
    }

    /// Finds the entry for `pc`.
    pub fn lookup(&self, pc: u64) -> Option<&HistoryEntry> {
        self.position(pc).map(|i| &self.slots[i])
    }

    /// Finds the entry for `pc` for mutation.
    pub fn lookup_mut(&mut self, pc: u64) -> Option<&mut HistoryEntry> {
        self.position(pc).map(move |i| &mut self.slots[i])
    }

    /// Admits a new entry, evicting the oldest-created one if the table is full.
    ///
    /// The caller must have checked that no entry for the same instruction exists.
    ///
    /// # Returns
    ///
    /// The evicted entry, if any.
    pub fn insert(&mut self, entry: HistoryEntry) -> Option<HistoryEntry> {
        debug_assert!(
            self.position(entry.pc()).is_none(),
            "duplicate entry for pc {:#x}",
            entry.pc()
        );

        if self.slots.len() < ENTRY_TABLE_CAPACITY {
            self.slots.push(entry);
            return None;
        }

        let evicted = mem::replace(&mut self.slots[self.oldest], entry);
        self.oldest = (self.oldest + 1) % ENTRY_TABLE_CAPACITY;
        Some(evicted)
    }

    /// Iterates over the entries from oldest-created to newest-created.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        let (newer, older) = self.slots.split_at(self.oldest);
        older.iter().chain(newer.iter())
    }
}
