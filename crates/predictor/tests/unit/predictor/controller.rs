//! Controller Tests.
//!
//! Drives `initialize` / `on_access` / `on_complete` end to end and verifies
//! entry creation, the zero-delta rule, issue order, filtering against host
//! state and in-flight requests, and completion handling.

use crate::common::harness::{BLOCK, TestContext};
use crate::common::mocks::MockMemory;
use dcpt_core::DcptPrefetcher;
use dcpt_core::common::{ConfigError, Delta, ENTRY_TABLE_CAPACITY, IN_FLIGHT_CAPACITY};
use mockall::predicate::always;
use pretty_assertions::assert_eq;

const PC: u64 = 0x40_0a10;
const BASE: u64 = 1000;

/// Address of the `n`th access in a 4-block stride starting at `BASE`.
const fn nth(n: u64) -> u64 {
    BASE + n * 4 * BLOCK
}

// ══════════════════════════════════════════════════════════
// 1. Cold start
// ══════════════════════════════════════════════════════════

/// The first access only creates the entry.
#[test]
fn first_access_creates_entry_without_prefetch() {
    let mut ctx = TestContext::new();
    assert!(ctx.access(PC, BASE).is_empty());

    let entry = ctx.entry(PC);
    assert_eq!(entry.last_address(), BASE);
    assert_eq!(entry.deltas().iter().map(Delta::value).collect::<Vec<_>>(), vec![1]);
    assert_eq!(ctx.pf.stats().correlations, 0);
}

/// Stride 4 blocks: nothing until the bigram recurs, then exactly the replayed address.
#[test]
fn repeating_stride_issues_predicted_address() {
    let mut ctx = TestContext::new();

    assert!(ctx.access(PC, nth(0)).is_empty());
    assert!(ctx.access(PC, nth(1)).is_empty(), "history [1, 8]: no prior bigram");
    assert!(ctx.access(PC, nth(2)).is_empty(), "history [1, 8, 8]: match has no successor");

    // History [1, 8, 8, 8]: (8, 8) at index 1 replays one delta of 8 blocks.
    let issued = ctx.access(PC, nth(3));
    assert_eq!(issued, vec![nth(3) + 8 * BLOCK]);
    assert_eq!(ctx.entry(PC).last_prefetched(), nth(3) + 8 * BLOCK);
    assert!(ctx.pf.in_flight().contains(nth(3) + 8 * BLOCK));
}

/// Longer history: every match replays; duplicates are filtered as in flight.
#[test]
fn fifth_access_replays_every_match() {
    let mut ctx = TestContext::new();
    let _ = ctx.stride(PC, BASE, 4, 4);

    // History [1, 8, 8, 8, 8]: matches at 1, 2 yield [+8, +16, +8] blocks.
    let issued = ctx.access(PC, nth(4));
    assert_eq!(issued, vec![nth(4) + 8 * BLOCK, nth(4) + 16 * BLOCK]);
    assert_eq!(ctx.pf.stats().rejected_in_flight, 1);
}

// ══════════════════════════════════════════════════════════
// 2. Zero deltas
// ══════════════════════════════════════════════════════════

/// Re-touching the same half block neither records a delta nor queries the host.
#[test]
fn zero_delta_access_is_not_informative() {
    let mut pf = DcptPrefetcher::with_block_size(BLOCK).unwrap_or_else(|e| panic!("{e}"));
    pf.initialize();

    let mut mem = MockMemory::new();
    mem.expect_is_cached().with(always()).never();
    mem.expect_is_queued().with(always()).never();
    mem.expect_issue_fetch().with(always()).never();

    pf.on_access(&mut mem, PC, 0x1000);
    pf.on_access(&mut mem, PC, 0x1000);
    pf.on_access(&mut mem, PC, 0x1000 + BLOCK / 2 - 1);

    assert_eq!(pf.stats().zero_deltas, 2);
    assert_eq!(pf.stats().correlations, 0);
    assert_eq!(pf.entry(PC).map(|e| e.deltas().len()), Some(1));
}

// ══════════════════════════════════════════════════════════
// 3. Filtering against host and in-flight state
// ══════════════════════════════════════════════════════════

/// A prediction the host reports cached is never issued.
#[test]
fn cached_prediction_not_issued() {
    let mut ctx = TestContext::new();
    let _ = ctx.mem.cached.insert(nth(3) + 8 * BLOCK);

    let issued = ctx.stride(PC, BASE, 4, 4);

    assert!(issued.is_empty());
    assert_eq!(ctx.pf.stats().rejected_cached, 1);
    assert_eq!(ctx.entry(PC).last_prefetched(), 0);
}

/// Every accepted prediction is handed to the host, in order, via `issue_fetch`.
#[test]
fn issue_fetch_receives_accepted_addresses() {
    let mut pf = DcptPrefetcher::with_block_size(BLOCK).unwrap_or_else(|e| panic!("{e}"));
    pf.initialize();

    let mut mem = MockMemory::new();
    mem.expect_is_cached().return_const(false);
    mem.expect_is_queued().return_const(false);
    mem.expect_issue_fetch()
        .with(mockall::predicate::eq(nth(3) + 8 * BLOCK))
        .times(1)
        .return_const(());

    for n in 0..4 {
        pf.on_access(&mut mem, PC, nth(n));
    }
    assert_eq!(pf.stats().prefetches_issued, 1);
}

/// A second instruction predicting an outstanding address is suppressed until
/// the first request completes.
#[test]
fn in_flight_suppresses_until_completion() {
    let mut ctx = TestContext::new();
    let target = nth(3) + 8 * BLOCK;

    assert_eq!(ctx.stride(PC, BASE, 4, 4), vec![target]);
    assert!(ctx.stride(PC + 4, BASE, 4, 4).is_empty(), "already in flight");

    ctx.pf.on_complete(target);
    assert!(!ctx.pf.in_flight().contains(target));
    assert_eq!(ctx.stride(PC + 8, BASE, 4, 4), vec![target]);
}

// ══════════════════════════════════════════════════════════
// 4. Completion
// ══════════════════════════════════════════════════════════

/// Completing an unknown address is silently ignored.
#[test]
fn untracked_completion_is_ignored() {
    let mut ctx = TestContext::new();
    let _ = ctx.stride(PC, BASE, 4, 4);
    let before: Vec<u64> = ctx.pf.in_flight().iter().collect();

    ctx.pf.on_complete(0xdead_beef);

    assert_eq!(ctx.pf.in_flight().iter().collect::<Vec<_>>(), before);
    assert_eq!(ctx.pf.stats().untracked_completions, 1);
    assert_eq!(ctx.pf.stats().completions, 0);
}

// ══════════════════════════════════════════════════════════
// 5. Capacity and lifecycle
// ══════════════════════════════════════════════════════════

/// The 101st instruction evicts the first; that instruction starts over.
#[test]
fn table_overflow_through_controller() {
    let mut ctx = TestContext::new();
    for pc in 0..=ENTRY_TABLE_CAPACITY as u64 {
        let _ = ctx.access(0x1000 + pc * 4, 0x10_0000);
    }

    assert_eq!(ctx.pf.table().len(), ENTRY_TABLE_CAPACITY);
    assert!(ctx.pf.entry(0x1000).is_none());
    assert!(ctx.pf.entry(0x1004).is_some());
    assert_eq!(ctx.pf.stats().entries_evicted, 1);

    // Re-admitted as a fresh entry: no delta, no prefetch.
    assert!(ctx.access(0x1000, 0x20_0000).is_empty());
    assert_eq!(ctx.pf.entry(0x1000).map(|e| e.deltas().len()), Some(1));
}

/// Many concurrent streams never grow the in-flight set past its bound.
#[test]
fn in_flight_bounded_under_many_streams() {
    let mut ctx = TestContext::new();
    for s in 0..40u64 {
        let _ = ctx.stride(0x2000 + s * 4, 0x1000_0000 + s * 0x10_0000, 2, 6);
        assert!(ctx.pf.in_flight().len() <= IN_FLIGHT_CAPACITY);
    }
    assert_eq!(ctx.pf.in_flight().len(), IN_FLIGHT_CAPACITY);
    assert!(ctx.pf.stats().in_flight_evictions > 0);
}

/// `initialize` forgets every entry and outstanding request.
#[test]
fn initialize_resets_state() {
    let mut ctx = TestContext::new();
    let _ = ctx.stride(PC, BASE, 4, 5);
    assert!(!ctx.pf.in_flight().is_empty());

    ctx.pf.initialize();

    assert!(ctx.pf.table().is_empty());
    assert!(ctx.pf.in_flight().is_empty());
    assert_eq!(ctx.pf.stats().accesses, 0);
    assert!(ctx.access(PC, nth(5)).is_empty(), "entry is recreated, not resumed");
}

/// Interleaved instructions train independently.
#[test]
fn interleaved_instructions_are_independent() {
    let mut ctx = TestContext::new();
    let other = 0x40_0b00;
    let mut issued = Vec::new();
    for n in 0..4 {
        issued.extend(ctx.access(PC, nth(n)));
        issued.extend(ctx.access(other, 0x9000_0000 + n * 2 * BLOCK));
    }
    assert_eq!(issued, vec![nth(3) + 8 * BLOCK, 0x9000_0000 + 6 * BLOCK + 4 * BLOCK]);
}

/// Two prefetchers share nothing.
#[test]
fn instances_are_isolated() {
    let mut a = TestContext::new();
    let mut b = TestContext::new();
    let _ = a.stride(PC, BASE, 4, 4);
    assert!(b.pf.entry(PC).is_none());
    assert!(b.pf.in_flight().is_empty());
}

#[test]
fn rejects_unquantizable_block_size() {
    assert!(matches!(
        DcptPrefetcher::with_block_size(1),
        Err(ConfigError::InvalidBlockSize(1))
    ));
}
