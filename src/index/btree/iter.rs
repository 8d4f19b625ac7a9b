//! In-order iterator over a [`BTree`].

use std::iter::FusedIterator;

use crate::common::NodeId;
use crate::index::btree::BTree;

/// Borrowing iterator yielding `(&K, &V)` in ascending key order.
///
/// Walks the tree with an explicit stack of `(node, next key index)`
/// frames instead of recursion. Before a key is yielded, the subtree to its
/// left has been fully drained; after yielding it, the leftmost path of the
/// subtree to its right is pushed.
///
/// Created by [`BTree::iter`].
pub struct Iter<'a, K, V> {
    tree: &'a BTree<K, V>,
    stack: Vec<(NodeId, usize)>,
    remaining: usize,
}

impl<'a, K: Ord, V> Iter<'a, K, V> {
    pub(crate) fn new(tree: &'a BTree<K, V>) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::with_capacity(tree.height()),
            remaining: tree.len(),
        };
        iter.push_leftmost(tree.root());
        iter
    }

    fn push_leftmost(&mut self, mut id: NodeId) {
        loop {
            self.stack.push((id, 0));
            match self.tree.node(id).children().first() {
                Some(&child) => id = child,
                None => break,
            }
        }
    }
}

impl<'a, K: Ord, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some(top) = self.stack.last_mut() {
            let (id, i) = *top;
            let node = tree.node(id);

            if i < node.len() {
                top.1 += 1;
                if let Some(&right) = node.children().get(i + 1) {
                    self.push_leftmost(right);
                }
                self.remaining -= 1;
                return Some((&node.keys()[i], &node.values()[i]));
            }

            // Node exhausted, its parent frame resumes.
            self.stack.pop();
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Ord, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K: Ord, V> FusedIterator for Iter<'_, K, V> {}
