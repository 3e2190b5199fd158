//! Chunk-table growth policy.
//!
//! Growth is a pure decision: given the current chunk count and capacity and a
//! requested capacity, [`plan`] returns the new chunk count and how far the
//! existing chunk handles move to keep them centred in the new table. The deque
//! applies the plan; the policy never touches memory.
//!
//! Invariants of a returned [`Growth`]:
//! - `chunk_count * chunk_size >= requested`, and `chunk_count` is the smallest
//!   such count;
//! - `chunk_count > old_chunk_count`;
//! - `shift == (chunk_count - old_chunk_count) / 2`, so the old handles occupy
//!   `[shift, shift + old_chunk_count)` and the spare chunks split evenly with
//!   any odd one going to the back.
//!
//! When a push runs out of room at either end it requests
//! [`growth_target`]`(capacity)`, i.e. three times the current capacity. Each
//! such growth leaves at least one old table's worth of free chunks on both
//! sides, which keeps both `push_back` and `push_front` amortised O(1).

/// Multiplier applied to the capacity when a push exhausts the table.
pub const GROWTH_FACTOR: usize = 3;

/// The outcome of a growth decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Growth {
    /// Chunk count of the new table.
    pub chunk_count: usize,
    /// Index in the new table where the first old chunk handle lands.
    pub shift: usize,
}

/// Capacity a push requests once it needs a slot outside the table: one chunk
/// from an empty table, otherwise `GROWTH_FACTOR` times the current capacity.
///
/// Saturates instead of overflowing; an unreachable target is then reported by
/// the allocation itself.
#[inline]
pub const fn growth_target(capacity: usize, chunk_size: usize) -> usize {
    if capacity == 0 {
        chunk_size
    } else {
        capacity.saturating_mul(GROWTH_FACTOR)
    }
}

/// Decides how to grow a table of `old_chunk_count` chunks (holding
/// `old_capacity` slots) so that it holds at least `requested` slots.
///
/// Returns `None` when the current capacity already suffices.
///
/// # Panics
/// Panics if `chunk_size` is zero.
#[inline]
pub const fn plan(
    old_chunk_count: usize,
    old_capacity: usize,
    requested: usize,
    chunk_size: usize,
) -> Option<Growth> {
    assert!(chunk_size != 0, "chunk size must be > 0");
    if old_capacity >= requested {
        return None;
    }
    let chunk_count = requested.div_ceil(chunk_size);
    Some(Growth {
        chunk_count,
        shift: (chunk_count - old_chunk_count) / 2,
    })
}
