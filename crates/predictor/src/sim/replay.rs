//! Trace Replay Driver.
//!
//! Plays the role of the memory-access driver: it owns a [`DcptPrefetcher`] and a
//! [`ReferenceHost`], calls `initialize` once, and then for every access
//!
//! 1. advances the host and delivers finished fetches to `on_complete`,
//! 2. performs the demand access against the host,
//! 3. hands the access to `on_access`, which may issue new fetches.

use tracing::debug;

use super::host::{HostStats, ReferenceHost};
use super::trace::Access;
use crate::common::ConfigError;
use crate::config::Config;
use crate::predictor::DcptPrefetcher;
use crate::stats::PrefetchStats;

/// Predictor plus reference host, driven one access at a time.
#[derive(Clone, Debug)]
pub struct Replay {
    prefetcher: DcptPrefetcher,
    host: ReferenceHost,
}

/// Summary of a finished replay.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Accesses replayed.
    pub accesses: u64,
    /// Host-side counters.
    pub host: HostStats,
    /// Predictor-side counters.
    pub predictor: PrefetchStats,
}

impl Replay {
    /// Builds and initializes a predictor and host from `config`.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure in `config`.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut prefetcher = DcptPrefetcher::from_validated(&config.predictor);
        prefetcher.initialize();
        let host = ReferenceHost::from_validated(config.predictor.block_size, &config.host);
        Ok(Self { prefetcher, host })
    }

    /// Replays a single access.
    ///
    /// # Returns
    ///
    /// `true` if the demand access hit.
    pub fn step(&mut self, access: Access) -> bool {
        for addr in self.host.tick() {
            self.prefetcher.on_complete(addr);
        }
        let hit = self.host.demand(access.addr);
        self.prefetcher.on_access(&mut self.host, access.pc, access.addr);
        hit
    }

    /// Replays every access in order and reports the totals.
    pub fn run(&mut self, accesses: &[Access]) -> ReplayReport {
        for &access in accesses {
            let _ = self.step(access);
        }
        debug!(accesses = accesses.len(), "replay finished");
        self.report()
    }

    /// Snapshot of the counters so far.
    pub fn report(&self) -> ReplayReport {
        ReplayReport {
            accesses: self.prefetcher.stats().accesses,
            host: self.host.stats().clone(),
            predictor: self.prefetcher.stats().clone(),
        }
    }

    /// The predictor being driven.
    pub const fn prefetcher(&self) -> &DcptPrefetcher {
        &self.prefetcher
    }

    /// The reference host.
    pub const fn host(&self) -> &ReferenceHost {
        &self.host
    }
}

impl ReplayReport {
    /// Demand hit rate in percent.
    pub fn hit_rate(&self) -> f64 {
        let total = self.host.demand_hits + self.host.demand_misses;
        if total == 0 {
            0.0
        } else {
            (self.host.demand_hits as f64 / total as f64) * 100.0
        }
    }

    /// Share of issued prefetches later hit by a demand access, in percent.
    pub fn accuracy(&self) -> f64 {
        if self.predictor.prefetches_issued == 0 {
            0.0
        } else {
            (self.host.useful_prefetches as f64 / self.predictor.prefetches_issued as f64) * 100.0
        }
    }

    /// Prints the replay summary followed by the requested predictor sections.
    ///
    /// See [`crate::stats::STATS_SECTIONS`] for section names; an empty slice prints all.
    pub fn print_sections(&self, sections: &[String]) {
        println!("\n==========================================================");
        println!("DCPT PREFETCH REPLAY STATISTICS");
        println!("==========================================================");
        println!("accesses                 {}", self.accesses);
        println!("demand.hits              {}", self.host.demand_hits);
        println!("demand.misses            {}", self.host.demand_misses);
        println!("demand.hit_rate          {:.2}%", self.hit_rate());
        println!("prefetch.queued          {}", self.host.fetches_queued);
        println!("prefetch.dropped         {}", self.host.fetches_dropped);
        println!("prefetch.useful          {}", self.host.useful_prefetches);
        println!("prefetch.accuracy        {:.2}%", self.accuracy());
        println!("----------------------------------------------------------");
        self.predictor.print_sections(sections);
    }
}
