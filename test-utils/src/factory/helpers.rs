//! Shared helper utilities for factory methods.

/// Counter for generating unique IDs in tests.
///
/// Starts high so generated member ids never collide with the small literal ids
/// tests use for readability.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(900_000_000);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}
