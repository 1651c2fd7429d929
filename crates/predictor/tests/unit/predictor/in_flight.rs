//! In-Flight Set Tests.
//!
//! Verifies the bounded FIFO of outstanding prefetches and the tolerance of
//! completion signals for unknown or duplicated addresses.

use dcpt_core::common::IN_FLIGHT_CAPACITY;
use dcpt_core::predictor::InFlightSet;
use pretty_assertions::assert_eq;

const CAP: u64 = IN_FLIGHT_CAPACITY as u64;

fn filled(count: u64) -> InFlightSet {
    let mut set = InFlightSet::new();
    for i in 0..count {
        let _ = set.insert(i * 64);
    }
    set
}

/// The 33rd insert abandons the oldest outstanding request.
#[test]
fn overflow_evicts_oldest() {
    let mut set = filled(CAP);
    assert_eq!(set.len(), IN_FLIGHT_CAPACITY);
    assert_eq!(set.insert(0xdead_0000), Some(0));
    assert_eq!(set.len(), IN_FLIGHT_CAPACITY);
    assert!(!set.contains(0));
    assert!(set.contains(64));
    assert!(set.contains(0xdead_0000));
}

#[test]
fn complete_removes_tracked_address() {
    let mut set = filled(4);
    assert!(set.complete(128));
    assert!(!set.contains(128));
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 64, 192]);
}

/// Completing an address that was never requested changes nothing.
#[test]
fn complete_untracked_is_noop() {
    let mut set = filled(4);
    let before: Vec<u64> = set.iter().collect();
    assert!(!set.complete(0xffff_0000));
    assert_eq!(set.iter().collect::<Vec<_>>(), before);
}

/// Duplicates are not collapsed; a completion removes only the first one.
#[test]
fn complete_removes_first_duplicate_only() {
    let mut set = InFlightSet::new();
    let _ = set.insert(0x40);
    let _ = set.insert(0x80);
    let _ = set.insert(0x40);
    assert!(set.complete(0x40));
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![0x80, 0x40]);
    assert!(set.complete(0x40));
    assert!(!set.contains(0x40));
}

/// An address abandoned on overflow is no longer completable.
#[test]
fn evicted_address_completion_is_ignored() {
    let mut set = filled(CAP);
    let _ = set.insert(0xdead_0000);
    assert!(!set.complete(0));
    assert_eq!(set.len(), IN_FLIGHT_CAPACITY);
}
