//! Predictor statistics collection and reporting.
//!
//! This module tracks what the predictor did with the access stream. It provides:
//! 1. **Training:** Accesses seen, entries created and evicted, zero and clamped deltas.
//! 2. **Prediction:** Correlations run and candidates produced.
//! 3. **Filtering:** Candidates rejected per reason and prefetches issued.
//! 4. **Completion:** Tracked and untracked completion signals, abandoned requests.
//!
//! Statistics are diagnostic only and never feed back into predictions.

use crate::predictor::FilterOutcome;

/// Counters describing one predictor run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrefetchStats {
    /// Accesses delivered to `on_access`.
    pub accesses: u64,
    /// History entries created.
    pub entries_created: u64,
    /// History entries evicted from a full table.
    pub entries_evicted: u64,
    /// Accesses whose quantized delta was zero.
    pub zero_deltas: u64,
    /// Deltas stored as the out-of-range sentinel.
    pub clamped_deltas: u64,

    /// Correlator invocations.
    pub correlations: u64,
    /// Candidate addresses produced by the correlator.
    pub candidates: u64,

    /// Candidates dropped because they were already in flight.
    pub rejected_in_flight: u64,
    /// Candidates dropped because they were cached.
    pub rejected_cached: u64,
    /// Candidates dropped because they were queued in an MSHR.
    pub rejected_queued: u64,
    /// Prefetch requests handed to the host.
    pub prefetches_issued: u64,

    /// Outstanding requests abandoned by in-flight overflow.
    pub in_flight_evictions: u64,
    /// Completion signals that matched an outstanding request.
    pub completions: u64,
    /// Completion signals for addresses no longer (or never) tracked.
    pub untracked_completions: u64,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"training"`, `"prediction"`, `"completion"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["training", "prediction", "completion"];

fn pct(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}

impl PrefetchStats {
    /// Folds one filter pass into the counters.
    pub fn absorb(&mut self, outcome: &FilterOutcome) {
        self.rejected_in_flight += outcome.rejected_in_flight;
        self.rejected_cached += outcome.rejected_cached;
        self.rejected_queued += outcome.rejected_queued;
        self.in_flight_evictions += outcome.in_flight_evictions;
    }

    /// Total candidates dropped by the filter.
    pub const fn rejected(&self) -> u64 {
        self.rejected_in_flight + self.rejected_cached + self.rejected_queued
    }

    /// Prefetches issued per observed access.
    pub fn issue_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.prefetches_issued as f64 / self.accesses as f64
        }
    }

    /// Prints only the requested sections to stdout.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an
    /// empty slice to print everything (same as `print()`).
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);

        if want("training") {
            println!("PREDICTOR TRAINING");
            println!("  accesses               {}", self.accesses);
            println!("  entries.created        {}", self.entries_created);
            println!("  entries.evicted        {}", self.entries_evicted);
            println!(
                "  deltas.zero            {} ({:.2}%)",
                self.zero_deltas,
                pct(self.zero_deltas, self.accesses)
            );
            println!("  deltas.clamped         {}", self.clamped_deltas);
            println!("----------------------------------------------------------");
        }
        if want("prediction") {
            println!("PREDICTION & FILTERING");
            println!("  correlations           {}", self.correlations);
            println!("  candidates             {}", self.candidates);
            println!(
                "  rejected.in_flight     {} ({:.2}%)",
                self.rejected_in_flight,
                pct(self.rejected_in_flight, self.candidates)
            );
            println!(
                "  rejected.cached        {} ({:.2}%)",
                self.rejected_cached,
                pct(self.rejected_cached, self.candidates)
            );
            println!(
                "  rejected.queued        {} ({:.2}%)",
                self.rejected_queued,
                pct(self.rejected_queued, self.candidates)
            );
            println!("  prefetches.issued      {}", self.prefetches_issued);
            println!("  prefetches.per_access  {:.4}", self.issue_rate());
            println!("----------------------------------------------------------");
        }
        if want("completion") {
            println!("IN-FLIGHT TRACKING");
            println!("  completions            {}", self.completions);
            println!("  completions.untracked  {}", self.untracked_completions);
            println!("  abandoned              {}", self.in_flight_evictions);
            println!("----------------------------------------------------------");
        }
    }

    /// Prints every section.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
