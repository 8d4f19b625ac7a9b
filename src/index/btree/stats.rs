//! B-tree statistics tracking.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Operation counters for a [`BTree`](crate::BTree).
///
/// Counters are atomic so `search(&self)` can count lookups, and are only
/// read back as a whole via [`snapshot`](Self::snapshot), so every access is
/// `Relaxed`.
///
/// # Example
/// ```
/// use btree_index::TreeStats;
/// use std::sync::atomic::Ordering;
///
/// let stats = TreeStats::new();
/// stats.node_splits.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(stats.node_splits.load(Ordering::Relaxed), 1);
/// ```
#[derive(Debug)]
pub struct TreeStats {
    /// Number of key/value pairs inserted.
    pub inserts: AtomicU64,

    /// Number of `search` calls.
    pub searches: AtomicU64,

    /// Number of `search` calls that found the key.
    pub search_hits: AtomicU64,

    /// Number of split-child operations, root splits included.
    pub node_splits: AtomicU64,

    /// Number of times the root was full and the tree grew in height.
    pub root_splits: AtomicU64,
}

impl TreeStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            inserts: AtomicU64::new(0),
            searches: AtomicU64::new(0),
            search_hits: AtomicU64::new(0),
            node_splits: AtomicU64::new(0),
            root_splits: AtomicU64::new(0),
        }
    }

    /// Fraction of searches that found their key (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        self.snapshot().hit_rate()
    }

    /// Copy every counter out.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            inserts: self.inserts.load(Ordering::Relaxed),
            searches: self.searches.load(Ordering::Relaxed),
            search_hits: self.search_hits.load(Ordering::Relaxed),
            node_splits: self.node_splits.load(Ordering::Relaxed),
            root_splits: self.root_splits.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.inserts.store(0, Ordering::Relaxed);
        self.searches.store(0, Ordering::Relaxed);
        self.search_hits.store(0, Ordering::Relaxed);
        self.node_splits.store(0, Ordering::Relaxed);
        self.root_splits.store(0, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_search(&self, hit: bool) {
        self.searches.fetch_add(1, Ordering::Relaxed);
        if hit {
            self.search_hits.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline]
    pub(crate) fn record_split(&self) {
        self.node_splits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_root_split(&self) {
        self.root_splits.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for TreeStats {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TreeStats {
    fn clone(&self) -> Self {
        let snap = self.snapshot();
        Self {
            inserts: AtomicU64::new(snap.inserts),
            searches: AtomicU64::new(snap.searches),
            search_hits: AtomicU64::new(snap.search_hits),
            node_splits: AtomicU64::new(snap.node_splits),
            root_splits: AtomicU64::new(snap.root_splits),
        }
    }
}

/// Plain copy of the counters at one moment, for printing and comparing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub inserts: u64,
    pub searches: u64,
    pub search_hits: u64,
    pub node_splits: u64,
    pub root_splits: u64,
}

impl StatsSnapshot {
    /// Fraction of searches that found their key (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        if self.searches == 0 {
            0.0
        } else {
            self.search_hits as f64 / self.searches as f64
        }
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ inserts: {}, searches: {}, hit_rate: {:.2}%, splits: {}, root_splits: {} }}",
            self.inserts,
            self.searches,
            self.hit_rate() * 100.0,
            self.node_splits,
            self.root_splits
        )
    }
}
