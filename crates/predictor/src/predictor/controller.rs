//! Delta-Correlating Prefetch Table (DCPT) controller.
//!
//! Wires the entry table, correlator, filter, and in-flight set behind the three
//! entry points a memory-access driver calls:
//!
//! 1. [`DcptPrefetcher::initialize`] before the first access,
//! 2. [`DcptPrefetcher::on_access`] once per observed access, in program order per PC,
//! 3. [`DcptPrefetcher::on_complete`] whenever an issued fetch finishes, in any order.
//!
//! All state lives in the prefetcher value owned by the caller, so independent
//! instances never interfere. Nothing here blocks, allocates per entry, or fails.

use tracing::{debug, trace};

use super::correlator::correlate;
use super::entry::{DeltaUpdate, HistoryEntry};
use super::filter::filter;
use super::in_flight::InFlightSet;
use super::table::EntryTable;
use super::traits::MemoryInterface;
use crate::common::ConfigError;
use crate::config::PredictorConfig;
use crate::stats::PrefetchStats;

/// Delta-correlating prefetch predictor.
#[derive(Clone, Debug)]
pub struct DcptPrefetcher {
    table: EntryTable,
    in_flight: InFlightSet,
    block_size: u64,
    trace_predictions: bool,
    stats: PrefetchStats,
}

impl DcptPrefetcher {
    /// Creates a prefetcher from a predictor configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBlockSize`] if the block size cannot be quantized.
    pub fn new(config: &PredictorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    /// Builds a prefetcher from a configuration the caller has already validated.
    pub(crate) fn from_validated(config: &PredictorConfig) -> Self {
        Self {
            table: EntryTable::new(),
            in_flight: InFlightSet::new(),
            block_size: config.block_size,
            trace_predictions: config.trace_predictions,
            stats: PrefetchStats::default(),
        }
    }

    /// Creates a prefetcher for `block_size`-byte blocks with default settings otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBlockSize`] if the block size cannot be quantized.
    pub fn with_block_size(block_size: u64) -> Result<Self, ConfigError> {
        Self::new(&PredictorConfig {
            block_size,
            ..PredictorConfig::default()
        })
    }

    /// Resets the entry table, in-flight set, and statistics to empty.
    pub fn initialize(&mut self) {
        self.table.clear();
        self.in_flight.clear();
        self.stats = PrefetchStats::default();
        debug!(block_size = self.block_size, "initialized DCPT prefetcher");
    }

    /// Observes one memory access by instruction `pc` to `addr`.
    ///
    /// The first access by an instruction only creates its entry. Later accesses
    /// record a delta and, when it is nonzero, correlate and filter; every accepted
    /// address is passed to [`MemoryInterface::issue_fetch`] in candidate order.
    pub fn on_access<M>(&mut self, memory: &mut M, pc: u64, addr: u64)
    where
        M: MemoryInterface + ?Sized,
    {
        self.stats.accesses += 1;

        let Some(entry) = self.table.lookup_mut(pc) else {
            self.admit(pc, addr);
            return;
        };

        match entry.record(addr, self.block_size) {
            DeltaUpdate::Unchanged => {
                self.stats.zero_deltas += 1;
                return;
            }
            DeltaUpdate::Recorded { clamped, .. } => {
                if clamped {
                    self.stats.clamped_deltas += 1;
                }
            }
        }

        let candidates = correlate(entry, self.block_size);
        self.stats.correlations += 1;
        self.stats.candidates += candidates.len() as u64;

        let outcome = filter(&candidates, entry, &mut self.in_flight, &*memory);
        self.stats.absorb(&outcome);

        if self.trace_predictions {
            debug!(
                pc = format_args!("{pc:#x}"),
                addr = format_args!("{addr:#x}"),
                ?candidates,
                accepted = ?outcome.accepted,
                "correlated"
            );
        }

        for target in outcome.accepted {
            trace!(
                pc = format_args!("{pc:#x}"),
                target = format_args!("{target:#x}"),
                "issue prefetch"
            );
            memory.issue_fetch(target);
            self.stats.prefetches_issued += 1;
        }
    }

    /// Signals that the fetch for `addr` has finished.
    ///
    /// Removes the first matching outstanding request. Unknown addresses are
    /// ignored: they were either abandoned on overflow or never requested.
    pub fn on_complete(&mut self, addr: u64) {
        if self.in_flight.complete(addr) {
            self.stats.completions += 1;
        } else {
            self.stats.untracked_completions += 1;
            trace!(addr = format_args!("{addr:#x}"), "completion for untracked address");
        }
    }

    fn admit(&mut self, pc: u64, addr: u64) {
        self.stats.entries_created += 1;
        if let Some(evicted) = self.table.insert(HistoryEntry::new(pc, addr)) {
            self.stats.entries_evicted += 1;
            debug!(
                evicted_pc = format_args!("{:#x}", evicted.pc()),
                "entry table full, evicted oldest entry"
            );
        }
    }

    /// History entry tracked for `pc`, if any.
    pub fn entry(&self, pc: u64) -> Option<&HistoryEntry> {
        self.table.lookup(pc)
    }

    /// Entry table.
    pub const fn table(&self) -> &EntryTable {
        &self.table
    }

    /// Outstanding prefetch requests.
    pub const fn in_flight(&self) -> &InFlightSet {
        &self.in_flight
    }

    /// Block size used for quantization and projection.
    pub const fn block_size(&self) -> u64 {
        self.block_size
    }

    /// Statistics gathered since the last `initialize`.
    pub const fn stats(&self) -> &PrefetchStats {
        &self.stats
    }
}
