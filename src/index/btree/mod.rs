//! B-tree index implementation.
//!
//! # Components
//! - [`BTree`] - The tree: search, insert with preemptive splitting, enumerate
//! - `Node` - Sorted keys, parallel values, child links (crate-private)
//! - [`Iter`] - In-order borrowing iterator
//! - [`TreeStats`] - Operation counters

mod iter;
mod node;
mod stats;
mod tree;

pub use iter::Iter;
pub(crate) use node::Node;
pub use stats::{StatsSnapshot, TreeStats};
pub use tree::BTree;
