//! Host memory-system interface.
//!
//! The predictor does not model caches or fetch queues itself. The host supplies
//! them through [`MemoryInterface`]: two membership queries used by the filter and
//! one fire-and-forget fetch request used by the controller.

/// Memory-system facilities the predictor queries and drives.
pub trait MemoryInterface {
    /// Returns `true` if the block containing `addr` is already resident.
    fn is_cached(&self, addr: u64) -> bool;

    /// Returns `true` if `addr` is already waiting in a miss-status-holding register.
    fn is_queued(&self, addr: u64) -> bool;

    /// Requests that `addr` be fetched. No result is consumed.
    fn issue_fetch(&mut self, addr: u64);
}
