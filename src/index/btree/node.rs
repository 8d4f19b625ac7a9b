//! B-tree node - a sorted run of keys with parallel values and child links.
//!
//! A [`Node`] holds:
//! - `keys` in non-decreasing order
//! - `values` parallel to `keys`
//! - `children` (internal nodes only), one more than the number of keys
//!
//! Nodes never reference their parent. They live in the tree's arena and
//! point at children by `NodeId`. Callers never see them.

use crate::common::NodeId;

/// A node in the B-tree arena.
///
/// # Layout
/// ```text
///   keys:      [ k0 | k1 | k2 ]
///   values:    [ v0 | v1 | v2 ]
///   children: [ c0 | c1 | c2 | c3 ]   (empty for leaves)
///
///   keys(c0) <= k0 <= keys(c1) <= k1 <= keys(c2) <= k2 <= keys(c3)
/// ```
#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) keys: Vec<K>,
    pub(crate) values: Vec<V>,
    pub(crate) children: Vec<NodeId>,
}

impl<K: Ord, V> Node<K, V> {
    /// Create a new empty leaf.
    pub(crate) fn new_leaf() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an internal node with no keys above the given children.
    ///
    /// Used when growing the root: the old root becomes the only child
    /// and is split immediately afterwards.
    pub(crate) fn new_internal(children: Vec<NodeId>) -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
            children,
        }
    }

    /// A node is a leaf iff it has no children.
    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of keys stored in this node.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether this node holds `max_keys` keys and must be split before
    /// an insertion descends into it.
    #[inline]
    pub(crate) fn is_full(&self, max_keys: usize) -> bool {
        self.keys.len() >= max_keys
    }

    pub(crate) fn keys(&self) -> &[K] {
        &self.keys
    }

    pub(crate) fn values(&self) -> &[V] {
        &self.values
    }

    pub(crate) fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Index of the first key that is `>= key`.
    ///
    /// Returns `len()` if every stored key is smaller. This is where a
    /// lookup either finds its match or picks the child to descend into.
    #[inline]
    pub(crate) fn lower_bound(&self, key: &K) -> usize {
        self.keys.partition_point(|k| k < key)
    }

    /// Index of the first key that is `> key`.
    ///
    /// Insertion uses this position so a duplicate lands after the keys
    /// equal to it.
    #[inline]
    pub(crate) fn upper_bound(&self, key: &K) -> usize {
        self.keys.partition_point(|k| k <= key)
    }

    /// Insert a key/value pair at `index`, shifting later entries right.
    pub(crate) fn insert_entry(&mut self, index: usize, key: K, value: V) {
        self.keys.insert(index, key);
        self.values.insert(index, value);
    }

    /// Split this node around position `mid`.
    ///
    /// Entries `mid + 1..` (and children `mid + 1..` for internal nodes)
    /// move into a new sibling of the same kind. The entry at `mid` is
    /// removed and returned for promotion into the parent. Afterwards this
    /// node keeps `mid` keys and, if internal, `mid + 1` children.
    ///
    /// # Panics
    /// Panics if `mid >= len()`.
    pub(crate) fn split_off(&mut self, mid: usize) -> (K, V, Node<K, V>) {
        assert!(mid < self.keys.len(), "split point out of range");

        let right_keys = self.keys.split_off(mid + 1);
        let right_values = self.values.split_off(mid + 1);
        let right_children = if self.is_leaf() {
            Vec::new()
        } else {
            self.children.split_off(mid + 1)
        };

        // `mid < len` was asserted, so `mid` is now the last position.
        let median_key = self.keys.remove(mid);
        let median_value = self.values.remove(mid);

        let sibling = Node {
            keys: right_keys,
            values: right_values,
            children: right_children,
        };

        (median_key, median_value, sibling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(keys: &[i64]) -> Node<i64, String> {
        let mut node = Node::new_leaf();
        for (i, &k) in keys.iter().enumerate() {
            node.insert_entry(i, k, format!("v{}", k));
        }
        node
    }

    #[test]
    fn test_new_leaf_node() {
        let node: Node<i64, ()> = Node::new_leaf();
        assert_eq!(node.len(), 0);
        assert!(node.children().is_empty());
        assert!(node.is_leaf());
    }

    #[test]
    fn test_new_internal_node() {
        let node: Node<i64, ()> = Node::new_internal(vec![NodeId::new(0)]);
        assert!(!node.is_leaf());
        assert_eq!(node.len(), 0);
        assert_eq!(node.children(), &[NodeId::new(0)]);
    }

    #[test]
    fn test_bounds() {
        let node = leaf(&[10, 20, 20, 30]);

        assert_eq!(node.lower_bound(&5), 0);
        assert_eq!(node.lower_bound(&20), 1);
        assert_eq!(node.upper_bound(&20), 3);
        assert_eq!(node.lower_bound(&25), 3);
        assert_eq!(node.upper_bound(&30), 4);
        assert_eq!(node.lower_bound(&99), 4);
    }

    #[test]
    fn test_is_full() {
        let node = leaf(&[1, 2, 3]);
        assert!(node.is_full(3));
        assert!(!node.is_full(5));
    }

    #[test]
    fn test_insert_entry_keeps_values_parallel() {
        let mut node = leaf(&[1, 3]);
        node.insert_entry(1, 2, "two".to_string());

        assert_eq!(node.keys(), &[1, 2, 3]);
        assert_eq!(node.values()[1], "two");
        assert_eq!(node.values()[2], "v3");
    }

    #[test]
    fn test_split_leaf() {
        // t = 3: full node holds 5 keys, mid = 2
        let mut node = leaf(&[1, 2, 3, 4, 5]);
        let (k, v, right) = node.split_off(2);

        assert_eq!(k, 3);
        assert_eq!(v, "v3");
        assert_eq!(node.keys(), &[1, 2]);
        assert_eq!(node.values(), &["v1".to_string(), "v2".to_string()]);
        assert_eq!(right.keys(), &[4, 5]);
        assert!(right.is_leaf());
    }

    #[test]
    fn test_split_internal() {
        // t = 2: full node holds 3 keys and 4 children, mid = 1
        let mut node: Node<i64, ()> = Node::new_internal((0..4).map(NodeId::new).collect());
        for (i, k) in [10, 20, 30].into_iter().enumerate() {
            node.insert_entry(i, k, ());
        }

        let (k, _, right) = node.split_off(1);

        assert_eq!(k, 20);
        assert_eq!(node.keys(), &[10]);
        assert_eq!(node.children(), &[NodeId(0), NodeId(1)]);
        assert_eq!(right.keys(), &[30]);
        assert_eq!(right.children(), &[NodeId(2), NodeId(3)]);
        assert!(!right.is_leaf());
    }

    #[test]
    #[should_panic(expected = "split point out of range")]
    fn test_split_empty_panics() {
        let mut node: Node<i64, ()> = Node::new_leaf();
        node.split_off(0);
    }
}
