//! Node identifier type.

use std::fmt;

/// Index of a node in the tree's arena (`nodes[id.0]`).
///
/// Nodes are never freed, so an id stays valid for the tree's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeId(pub(crate) usize);

impl NodeId {
    #[inline]
    pub(crate) fn new(id: usize) -> Self {
        NodeId(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node #{}", self.0)
    }
}
