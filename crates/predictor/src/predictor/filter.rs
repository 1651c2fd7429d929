//! Prefetch Filter.
//!
//! Drops candidates that would be redundant: already outstanding, already
//! resident, or already queued as a miss. Survivors are recorded as in flight and
//! become the entry's last prefetched address.

use super::entry::HistoryEntry;
use super::in_flight::InFlightSet;
use super::traits::MemoryInterface;

/// Result of filtering one candidate list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Accepted addresses, in candidate order.
    pub accepted: Vec<u64>,
    /// Candidates dropped because they were already in flight.
    pub rejected_in_flight: u64,
    /// Candidates dropped because the host reported them cached.
    pub rejected_cached: u64,
    /// Candidates dropped because the host reported them queued.
    pub rejected_queued: u64,
    /// Outstanding addresses abandoned to make room for accepted ones.
    pub in_flight_evictions: u64,
}

/// Filters `candidates` against the in-flight set and the host's cache and MSHR state.
///
/// Checks run in order (in flight, cached, queued) and stop at the first that
/// rejects. Rejected candidates leave no trace in `entry` or `in_flight`.
pub fn filter<M>(
    candidates: &[u64],
    entry: &mut HistoryEntry,
    in_flight: &mut InFlightSet,
    memory: &M,
) -> FilterOutcome
where
    M: MemoryInterface + ?Sized,
{
    let mut outcome = FilterOutcome::default();

    for &addr in candidates {
        if in_flight.contains(addr) {
            outcome.rejected_in_flight += 1;
            continue;
        }
        if memory.is_cached(addr) {
            outcome.rejected_cached += 1;
            continue;
        }
        if memory.is_queued(addr) {
            outcome.rejected_queued += 1;
            continue;
        }

        outcome.accepted.push(addr);
        entry.set_last_prefetched(addr);
        if in_flight.insert(addr).is_some() {
            outcome.in_flight_evictions += 1;
        }
    }

    outcome
}
