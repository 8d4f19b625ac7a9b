//! btree-index - An in-memory B-tree index.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          btree-index                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │        SharedBTree (index/)  [optional, caller-side]    │   │
//! │  │          Arc<RwLock<BTree>> - external locking          │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              BTree (index/btree/)                        │   │
//! │  │   search  |  insert + split-child  |  enumerate / iter   │   │
//! │  │        node arena: Vec<Node>, addressed by NodeId        │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │           Common (common/)                               │   │
//! │  │        config constants, Error/Result, node ids          │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (Error, config)
//! - [`index`] - The B-tree and its shared handle
//!
//! # Quick Start
//! ```
//! use btree_index::BTree;
//!
//! let mut tree = BTree::new(3)?;
//! for (id, name) in [(10, "David"), (1, "Alice"), (7, "Charlie")] {
//!     tree.insert(id, name);
//! }
//!
//! assert_eq!(tree.search(&7), Some(&"Charlie"));
//! let ids: Vec<i32> = tree.keys().copied().collect();
//! assert_eq!(ids, vec![1, 7, 10]);
//! # Ok::<(), btree_index::Error>(())
//! ```

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_DEGREE, MAX_DEGREE, MIN_DEGREE};
pub use common::{Error, Result};

pub use index::btree::{BTree, Iter, StatsSnapshot, TreeStats};
pub use index::SharedBTree;
