//! Positional index policy.
//!
//! Routes address boards, columns and tasks by position, so a stale index is
//! normal input rather than a bug. Lookups clamp into range instead of failing;
//! an empty container has no valid index at all.

/// Clamp `index` into `[0, len - 1]`. `None` when `len == 0`.
pub fn clamp_index(index: usize, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(index.min(len - 1))
    }
}

/// Clamp an insertion point into `[0, len]`.
pub fn clamp_insert(index: usize, len: usize) -> usize {
    index.min(len)
}
