//! Index structures.
//!
//! - [`btree`] - The in-memory B-tree
//! - [`SharedBTree`] - A lock-wrapped handle for sharing a tree across threads

pub mod btree;
mod shared;

pub use shared::SharedBTree;
