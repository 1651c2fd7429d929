//! Delta Correlator.
//!
//! Detects that an instruction's latest two deltas (the query bigram) occurred
//! earlier in its history, and replays whatever followed them to predict the
//! next addresses.
//!
//! Given a history `d0 d1 .. dn` with query bigram `(d(n-1), dn)`, every adjacent
//! pair `(di, d(i+1))` equal to the bigram is a match. For each match, in scan
//! order, the deltas `d(i+2) .. dn` are scaled to whole blocks and accumulated
//! from the entry's last address; each partial sum is a candidate. Matches are not
//! deduplicated, so candidates may repeat.
//!
//! # Performance
//!
//! - **Time Complexity:** O(D²) worst case for a history of depth D (6).
//! - **Space Complexity:** O(D²) candidates worst case.

use super::entry::HistoryEntry;

/// Produces candidate prefetch addresses for `entry`, in issue order.
///
/// Returns no candidates when the history holds fewer than two deltas, since no
/// query bigram exists; the controller never calls it in that state.
///
/// # Arguments
///
/// * `entry` - The history entry whose latest access was just recorded.
/// * `block_size` - Cache block size in bytes; each replayed delta moves by
///   `delta * block_size`.
pub fn correlate(entry: &HistoryEntry, block_size: u64) -> Vec<u64> {
    let Some((last2, last1)) = entry.deltas().last_pair() else {
        return Vec::new();
    };

    let deltas = entry.deltas().as_slice();
    let mut candidates = Vec::new();

    for (i, pair) in deltas.windows(2).enumerate() {
        if pair[0] != last2 || pair[1] != last1 {
            continue;
        }

        let mut address = entry.last_address();
        for delta in &deltas[i + 2..] {
            address = address.wrapping_add_signed(delta.offset_bytes(block_size));
            candidates.push(address);
        }
    }

    candidates
}
