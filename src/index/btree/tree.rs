//! The B-tree - search, insertion with preemptive splitting, enumeration.

use std::fmt::Debug;

use crate::common::config::{max_keys, min_keys, DEFAULT_DEGREE, MAX_DEGREE, MIN_DEGREE};
use crate::common::{Error, NodeId, Result};
use crate::index::btree::{Iter, Node, TreeStats};

/// An in-memory B-tree mapping ordered keys to opaque values.
///
/// # Architecture
/// ```text
/// ┌──────────────────────────────────────────────────────────┐
/// │                       BTree<K, V>                        │
/// │  root: NodeId ─┐                                         │
/// │                ▼                                         │
/// │  nodes: Vec<Node>  [Node0] [Node1] [Node2] [Node3] ...   │
/// │                      │ children: Vec<NodeId>             │
/// │                      └──▶ indices into the same arena    │
/// │  degree: t        stats: TreeStats (atomic counters)     │
/// └──────────────────────────────────────────────────────────┘
/// ```
///
/// Every node holds at most `2t - 1` keys. Insertion never lets a node
/// overflow: a full child is split *before* descent enters it, and a full
/// root is split before insertion starts, which is the only way the tree
/// grows taller. All leaves therefore stay at the same depth.
///
/// # Duplicate keys
/// `insert` does not check for an existing key. Inserting a key twice
/// stores both pairs; `search` returns whichever copy it meets first on the
/// way down and `enumerate` yields both, in insertion order.
///
/// # Thread Safety
/// The tree has no internal locking. Wrap it in
/// [`SharedBTree`](crate::SharedBTree) (or your own lock) to share it
/// between threads.
///
/// # Usage
/// ```
/// use btree_index::BTree;
///
/// let mut tree = BTree::new(3)?;
/// tree.insert(10, "ten");
/// tree.insert(5, "five");
///
/// assert_eq!(tree.search(&10), Some(&"ten"));
/// assert_eq!(tree.search(&99), None);
/// assert_eq!(tree.enumerate(), vec![(&5, &"five"), (&10, &"ten")]);
/// # Ok::<(), btree_index::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct BTree<K, V> {
    /// Node arena. Nodes are appended and never removed.
    nodes: Vec<Node<K, V>>,

    /// Current root; replaced when the root splits.
    root: NodeId,

    /// Minimum degree `t` (immutable after construction).
    degree: usize,

    /// Number of key/value pairs stored.
    len: usize,

    stats: TreeStats,
}

impl<K: Ord, V> BTree<K, V> {
    /// Create an empty tree with minimum degree `degree`.
    ///
    /// # Errors
    /// - `Error::InvalidDegree` if `degree < 2` or `degree > MAX_DEGREE`
    pub fn new(degree: usize) -> Result<Self> {
        if !(MIN_DEGREE..=MAX_DEGREE).contains(&degree) {
            return Err(Error::InvalidDegree {
                degree,
                min: MIN_DEGREE,
                max: MAX_DEGREE,
            });
        }
        Ok(Self::with_valid_degree(degree))
    }

    /// Create an empty tree with [`DEFAULT_DEGREE`].
    pub fn with_default_degree() -> Self {
        Self::with_valid_degree(DEFAULT_DEGREE)
    }

    fn with_valid_degree(degree: usize) -> Self {
        debug_assert!((MIN_DEGREE..=MAX_DEGREE).contains(&degree));
        Self {
            nodes: vec![Node::new_leaf()],
            root: NodeId::new(0),
            degree,
            len: 0,
            stats: TreeStats::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Minimum degree `t`.
    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Maximum number of keys per node (`2t - 1`).
    #[inline]
    pub fn max_keys(&self) -> usize {
        max_keys(self.degree)
    }

    /// Number of key/value pairs stored, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes allocated, root included.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of levels. A tree whose root is a leaf has height 1.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut node = self.node(self.root);
        while let Some(&first) = node.children.first() {
            node = self.node(first);
            height += 1;
        }
        height
    }

    #[inline]
    pub(crate) fn root(&self) -> NodeId {
        self.root
    }

    /// Borrow a node by id. Ids only come from this tree's own arena.
    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id.0]
    }

    /// Operation counters.
    #[inline]
    pub fn stats(&self) -> &TreeStats {
        &self.stats
    }

    // ========================================================================
    // Public API: search
    // ========================================================================

    /// Look up the value stored under `key`.
    ///
    /// Returns `None` if the key is absent. With duplicate keys, returns the
    /// first copy met during descent.
    pub fn search(&self, key: &K) -> Option<&V> {
        let found = self.find(key);
        self.stats.record_search(found.is_some());
        found
    }

    /// Whether `key` is stored in the tree.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    fn find(&self, key: &K) -> Option<&V> {
        let mut node = self.node(self.root);
        loop {
            let i = node.lower_bound(key);
            if i < node.len() && node.keys[i] == *key {
                return Some(&node.values[i]);
            }
            if node.is_leaf() {
                return None;
            }
            node = self.node(node.children[i]);
        }
    }

    // ========================================================================
    // Public API: insert
    // ========================================================================

    /// Insert a key/value pair.
    ///
    /// Existing entries with the same key are kept; see the type-level docs
    /// on duplicate keys.
    pub fn insert(&mut self, key: K, value: V) {
        if self.node(self.root).is_full(self.max_keys()) {
            self.grow_root();
        }
        self.insert_non_full(self.root, key, value);
        self.len += 1;
        self.stats.record_insert();
    }

    /// Put a new empty root above the full root and split the old root
    /// into it. This is the only place the tree gains height.
    fn grow_root(&mut self) {
        let old_root = self.root;
        let new_root = self.alloc(Node::new_internal(vec![old_root]));
        self.root = new_root;
        self.split_child(new_root, 0);
        self.stats.record_root_split();
    }

    /// Insert into the subtree at `node_id`, which must not be full.
    ///
    /// Full children are split before descending, so every node visited
    /// after the root also has room.
    fn insert_non_full(&mut self, mut node_id: NodeId, key: K, value: V) {
        let max = self.max_keys();
        loop {
            let node = self.node(node_id);
            debug_assert!(!node.is_full(max), "descended into a full node");

            let mut i = node.upper_bound(&key);
            if node.is_leaf() {
                self.nodes[node_id.0].insert_entry(i, key, value);
                return;
            }

            if self.node(node.children[i]).is_full(max) {
                self.split_child(node_id, i);
                if key >= self.node(node_id).keys[i] {
                    i += 1;
                }
            }
            node_id = self.node(node_id).children[i];
        }
    }

    /// Split the full child at `parent.children[index]`.
    ///
    /// The child keeps its left `t - 1` keys, the right `t - 1` keys move
    /// to a new sibling at `parent.children[index + 1]`, and the median is
    /// promoted into `parent` at `index`.
    fn split_child(&mut self, parent: NodeId, index: usize) {
        let child = self.node(parent).children[index];
        let (median_key, median_value, sibling) =
            self.nodes[child.0].split_off(self.degree - 1);
        let sibling = self.alloc(sibling);

        let parent = &mut self.nodes[parent.0];
        parent.insert_entry(index, median_key, median_value);
        parent.children.insert(index + 1, sibling);

        self.stats.record_split();
    }

    fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    // ========================================================================
    // Public API: enumerate
    // ========================================================================

    /// All key/value pairs in ascending key order.
    ///
    /// Does not modify the tree; calling it twice yields the same sequence.
    pub fn enumerate(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    /// Lazily iterate over all pairs in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    /// Iterate over keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Iterate over values in ascending key order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Check every structural invariant.
    ///
    /// - keys within a node are non-decreasing and `values` is parallel
    /// - every node holds at most `2t - 1` keys, non-root nodes at least `t - 1`
    /// - internal nodes have exactly one more child than keys
    /// - subtree keys fall between the separating parent keys
    /// - all leaves sit at the same depth
    /// - every arena node is reachable exactly once and `len` matches
    ///
    /// # Errors
    /// - `Error::Corrupted` describing the first violation found
    pub fn validate(&self) -> Result<()>
    where
        K: Debug,
    {
        let mut state = Validation {
            leaf_depth: None,
            visited: vec![false; self.nodes.len()],
            entries: 0,
        };
        self.validate_node(self.root, 0, None, None, &mut state)?;

        if state.entries != self.len {
            return Err(Error::Corrupted(format!(
                "len is {} but {} entries are reachable",
                self.len, state.entries
            )));
        }
        if let Some(orphan) = state.visited.iter().position(|seen| !seen) {
            return Err(Error::Corrupted(format!(
                "{} is not reachable from the root",
                NodeId::new(orphan)
            )));
        }
        Ok(())
    }

    fn validate_node(
        &self,
        id: NodeId,
        depth: usize,
        lower: Option<&K>,
        upper: Option<&K>,
        state: &mut Validation,
    ) -> Result<()>
    where
        K: Debug,
    {
        let corrupted = |msg: String| Err(Error::Corrupted(format!("{}: {}", id, msg)));

        match state.visited.get_mut(id.0) {
            None => return corrupted("id outside the node arena".to_string()),
            Some(true) => return corrupted("reachable more than once".to_string()),
            Some(seen) => *seen = true,
        }

        let node = self.node(id);
        let n = node.len();

        if node.values.len() != n {
            return corrupted(format!("{} keys but {} values", n, node.values.len()));
        }
        if n > self.max_keys() {
            return corrupted(format!("{} keys exceeds maximum {}", n, self.max_keys()));
        }
        if id != self.root && n < min_keys(self.degree) {
            return corrupted(format!(
                "{} keys is below minimum {}",
                n,
                min_keys(self.degree)
            ));
        }
        if let Some(w) = node.keys.windows(2).find(|w| w[0] > w[1]) {
            return corrupted(format!("keys out of order: {:?} > {:?}", w[0], w[1]));
        }
        if let (Some(lo), Some(first)) = (lower, node.keys.first()) {
            if first < lo {
                return corrupted(format!("key {:?} below separator {:?}", first, lo));
            }
        }
        if let (Some(hi), Some(last)) = (upper, node.keys.last()) {
            if last > hi {
                return corrupted(format!("key {:?} above separator {:?}", last, hi));
            }
        }
        state.entries += n;

        if node.is_leaf() {
            return match state.leaf_depth {
                None => {
                    state.leaf_depth = Some(depth);
                    Ok(())
                }
                Some(expected) if expected == depth => Ok(()),
                Some(expected) => corrupted(format!(
                    "leaf at depth {} but other leaves at depth {}",
                    depth, expected
                )),
            };
        }

        if node.children.len() != n + 1 {
            return corrupted(format!(
                "{} keys but {} children",
                n,
                node.children.len()
            ));
        }
        for (i, &child) in node.children.iter().enumerate() {
            let lo = if i == 0 { lower } else { Some(&node.keys[i - 1]) };
            let hi = if i == n { upper } else { Some(&node.keys[i]) };
            self.validate_node(child, depth + 1, lo, hi, state)?;
        }
        Ok(())
    }
}

struct Validation {
    leaf_depth: Option<usize>,
    visited: Vec<bool>,
    entries: usize,
}

impl<K: Ord, V> Default for BTree<K, V> {
    fn default() -> Self {
        Self::with_default_degree()
    }
}

impl<K: Ord, V> Extend<(K, V)> for BTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::with_default_degree();
        tree.extend(iter);
        tree
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a BTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
