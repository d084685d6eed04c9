//! Core scheduler constants for offline sync.

/// Minimum seconds between flush cycle starts, regardless of which trigger
/// fired. The gate, not the queue, enforces this.
pub const FLUSH_DEBOUNCE_SECS: u64 = 5;
