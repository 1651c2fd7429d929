//! Reference Host Memory Model.
//!
//! A minimal memory system for driving the predictor from a trace. It models:
//! 1. **Residency:** The set of blocks present in the cache. Capacity is unbounded;
//!    replacement is deliberately out of scope.
//! 2. **MSHR Queue:** A bounded FIFO of outstanding fetches, each completing a fixed
//!    number of accesses after it was issued.
//! 3. **Demand Accounting:** Hits, misses, and hits on blocks brought in by a prefetch.
//!
//! Demand misses fill their block immediately and do not occupy an MSHR; only
//! prefetches are queued. A prefetch issued while every MSHR is busy is dropped.

use std::collections::{HashSet, VecDeque};

use tracing::trace;

use crate::common::ConfigError;
use crate::config::{HostConfig, check_block_size};
use crate::predictor::MemoryInterface;

#[derive(Clone, Copy, Debug)]
struct PendingFetch {
    /// Address exactly as requested, reported back on completion.
    addr: u64,
    block: u64,
    ready_at: u64,
}

/// Counters kept by the reference host.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HostStats {
    /// Demand accesses that found their block resident.
    pub demand_hits: u64,
    /// Demand accesses that had to fill their block.
    pub demand_misses: u64,
    /// Demand hits on a block first brought in by a prefetch.
    pub useful_prefetches: u64,
    /// Prefetches accepted into the MSHR queue.
    pub fetches_queued: u64,
    /// Prefetches dropped because the MSHR queue was full.
    pub fetches_dropped: u64,
}

/// Trace-driven cache and MSHR model.
#[derive(Clone, Debug)]
pub struct ReferenceHost {
    block_size: u64,
    fetch_latency: u64,
    mshr_entries: usize,
    now: u64,
    resident: HashSet<u64>,
    prefetched: HashSet<u64>,
    mshr: VecDeque<PendingFetch>,
    stats: HostStats,
}

impl ReferenceHost {
    /// Creates an empty host for `block_size`-byte blocks.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBlockSize`] unless `block_size` is a power of
    /// two of at least 2 bytes, or [`ConfigError::InvalidMshrEntries`] for a host
    /// without MSHRs.
    pub fn new(block_size: u64, config: &HostConfig) -> Result<Self, ConfigError> {
        check_block_size(block_size)?;
        config.validate()?;
        Ok(Self::from_validated(block_size, config))
    }

    /// Builds a host from settings the caller has already validated.
    pub(crate) fn from_validated(block_size: u64, config: &HostConfig) -> Self {
        Self {
            block_size,
            fetch_latency: config.fetch_latency,
            mshr_entries: config.mshr_entries,
            now: 0,
            resident: HashSet::new(),
            prefetched: HashSet::new(),
            mshr: VecDeque::with_capacity(config.mshr_entries),
            stats: HostStats::default(),
        }
    }

    #[inline]
    const fn block_of(&self, addr: u64) -> u64 {
        addr & !(self.block_size - 1)
    }

    /// Advances time by one access and retires every fetch that is due.
    ///
    /// # Returns
    ///
    /// The requested addresses of the fetches that completed, oldest first.
    pub fn tick(&mut self) -> Vec<u64> {
        self.now += 1;
        let mut completed = Vec::new();
        while let Some(front) = self.mshr.front().copied() {
            if front.ready_at > self.now {
                break;
            }
            let _ = self.mshr.pop_front();
            if self.resident.insert(front.block) {
                let _ = self.prefetched.insert(front.block);
            }
            completed.push(front.addr);
        }
        completed
    }

    /// Performs a demand access, filling the block on a miss.
    ///
    /// # Returns
    ///
    /// `true` on a hit.
    pub fn demand(&mut self, addr: u64) -> bool {
        let block = self.block_of(addr);
        if self.resident.contains(&block) {
            self.stats.demand_hits += 1;
            if self.prefetched.remove(&block) {
                self.stats.useful_prefetches += 1;
            }
            true
        } else {
            self.stats.demand_misses += 1;
            let _ = self.resident.insert(block);
            false
        }
    }

    /// Number of fetches currently outstanding.
    pub fn outstanding(&self) -> usize {
        self.mshr.len()
    }

    /// Host counters.
    pub const fn stats(&self) -> &HostStats {
        &self.stats
    }
}

impl MemoryInterface for ReferenceHost {
    fn is_cached(&self, addr: u64) -> bool {
        self.resident.contains(&self.block_of(addr))
    }

    fn is_queued(&self, addr: u64) -> bool {
        let block = self.block_of(addr);
        self.mshr.iter().any(|p| p.block == block)
    }

    fn issue_fetch(&mut self, addr: u64) {
        if self.mshr.len() >= self.mshr_entries {
            self.stats.fetches_dropped += 1;
            trace!(addr = format_args!("{addr:#x}"), "MSHR queue full, prefetch dropped");
            return;
        }
        self.mshr.push_back(PendingFetch {
            addr,
            block: self.block_of(addr),
            ready_at: self.now.saturating_add(self.fetch_latency),
        });
        self.stats.fetches_queued += 1;
    }
}
