//! Configuration constants for the B-tree index.

/// Smallest legal minimum degree.
///
/// With `t = 1` a full node would hold a single key, and splitting it at
/// `mid = t - 1 = 0` leaves both halves empty. Degree 2 (a 2-3-4 tree) is
/// the smallest fan-out where the split invariants hold.
pub const MIN_DEGREE: usize = 2;

/// Largest legal minimum degree.
///
/// Above this, `2t - 1` no longer fits in a `usize`.
pub const MAX_DEGREE: usize = usize::MAX / 2;

/// Degree used by [`BTree::default`](crate::BTree).
///
/// Nodes hold between 2 and 5 keys, matching the classic textbook examples.
pub const DEFAULT_DEGREE: usize = 3;

/// Maximum number of keys a node may hold for minimum degree `t`.
///
/// A node at this size is "full" and is split before insertion descends into it.
#[inline]
pub const fn max_keys(degree: usize) -> usize {
    2 * degree - 1
}

/// Minimum number of keys held by any non-root node after a split.
#[inline]
pub const fn min_keys(degree: usize) -> usize {
    degree - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_degree_is_legal() {
        assert!(DEFAULT_DEGREE >= MIN_DEGREE);
    }

    #[test]
    fn test_max_degree_capacity_fits_usize() {
        assert_eq!(max_keys(MAX_DEGREE), usize::MAX - 2);
        assert!(MAX_DEGREE.checked_add(1).and_then(|t| t.checked_mul(2)).is_none());
    }

    #[test]
    fn test_key_bounds() {
        assert_eq!(max_keys(2), 3);
        assert_eq!(min_keys(2), 1);
        assert_eq!(max_keys(3), 5);
        assert_eq!(min_keys(3), 2);
    }

    #[test]
    fn test_split_halves_meet_minimum() {
        // A full node splits into two halves of `t - 1` keys plus one median.
        for t in MIN_DEGREE..10 {
            assert_eq!(max_keys(t), 2 * min_keys(t) + 1);
        }
    }
}
