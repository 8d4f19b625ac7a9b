//! Shared B-tree handle - external locking around a single-threaded tree.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::common::Result;
use crate::index::btree::{BTree, StatsSnapshot};

/// A cloneable, thread-safe handle to a [`BTree`].
///
/// The tree itself never locks. This handle supplies the external mutual
/// exclusion callers need when several threads touch one tree:
/// - searches and enumeration take the read lock (many readers)
/// - inserts take the write lock (one writer)
///
/// Each method holds the lock for exactly one tree operation. Use
/// [`read`](Self::read) or [`write`](Self::write) to run several
/// operations under one guard.
///
/// # Example
/// ```
/// use btree_index::SharedBTree;
/// use std::thread;
///
/// let index = SharedBTree::new(3)?;
/// let writer = index.clone();
/// thread::spawn(move || writer.insert(1, "one".to_string()))
///     .join()
///     .unwrap();
///
/// assert_eq!(index.get(&1), Some("one".to_string()));
/// # Ok::<(), btree_index::Error>(())
/// ```
pub struct SharedBTree<K, V> {
    inner: Arc<RwLock<BTree<K, V>>>,
}

impl<K: Ord, V> SharedBTree<K, V> {
    /// Create a handle to a new empty tree.
    ///
    /// # Errors
    /// - `Error::InvalidDegree` if `degree` is outside `[MIN_DEGREE, MAX_DEGREE]`
    pub fn new(degree: usize) -> Result<Self> {
        Ok(Self::from_tree(BTree::new(degree)?))
    }

    /// Take ownership of an existing tree.
    pub fn from_tree(tree: BTree<K, V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    /// Insert a key/value pair under the write lock.
    pub fn insert(&self, key: K, value: V) {
        self.inner.write().insert(key, value);
    }

    /// Clone out the value stored under `key`.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.read().search(key).cloned()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.read().contains_key(key)
    }

    /// Clone out every pair in ascending key order.
    ///
    /// The copy is consistent: no insert can interleave with it.
    pub fn entries(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.inner
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Snapshot of the tree's operation counters.
    pub fn stats(&self) -> StatsSnapshot {
        self.inner.read().stats().snapshot()
    }

    /// Acquire the read lock for several read-only operations.
    pub fn read(&self) -> RwLockReadGuard<'_, BTree<K, V>> {
        self.inner.read()
    }

    /// Acquire the write lock for several mutating operations.
    pub fn write(&self) -> RwLockWriteGuard<'_, BTree<K, V>> {
        self.inner.write()
    }
}

impl<K, V> Clone for SharedBTree<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: Ord, V> Default for SharedBTree<K, V> {
    fn default() -> Self {
        Self::from_tree(BTree::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;

    #[test]
    fn test_new_rejects_small_degree() {
        let err = SharedBTree::<i64, ()>::new(1).err();
        assert!(matches!(err, Some(Error::InvalidDegree { degree: 1, min: 2, .. })));
    }

    #[test]
    fn test_clones_share_one_tree() {
        let a: SharedBTree<i64, i64> = SharedBTree::new(2).unwrap();
        let b = a.clone();

        a.insert(1, 10);
        b.insert(2, 20);

        assert_eq!(a.len(), 2);
        assert_eq!(b.get(&1), Some(10));
        assert!(a.contains_key(&2));
        assert_eq!(a.entries(), vec![(1, 10), (2, 20)]);
    }

    #[test]
    fn test_guards_batch_operations() {
        let index: SharedBTree<i64, ()> = SharedBTree::default();
        {
            let mut tree = index.write();
            for k in 0..50 {
                tree.insert(k, ());
            }
        }

        let tree = index.read();
        tree.validate().unwrap();
        assert_eq!(tree.len(), 50);
    }

    #[test]
    fn test_stats_snapshot() {
        let index: SharedBTree<i64, i64> = SharedBTree::new(3).unwrap();
        index.insert(5, 50);
        index.get(&5);
        index.get(&6);

        let stats = index.stats();
        assert_eq!(stats.inserts, 1);
        assert_eq!(stats.searches, 2);
        assert_eq!(stats.search_hits, 1);
    }
}
