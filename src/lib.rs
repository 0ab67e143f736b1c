//! This crate exposes a linked Binary Search Tree (BST) with opt-in
//! rebalancing, mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! add, find, and remove stored items. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores an item
//! and will sometimes have child `Node`s. The invariant kept by this
//! crate's [`Tree`] is:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree hold items
//!    less than its own item.
//! 2. For every `Node`, all the `Node`s in its right subtree hold items
//!    greater than or equal to its own item.
//!
//! > Ties go right, so the tree behaves like an ordered multiset.
//!
//! Searching takes `O(height)`. This tree never rotates on insert, so adding
//! items in sorted order builds a chain whose height is `N - 1`. Calling
//! [`Tree::rebalance`] tears the tree down and rebuilds it by median
//! partition, bringing the height back to roughly `lg N`.
//!
//! # Examples
//!
//! ```
//! use linked_bst::Tree;
//!
//! let mut tree: Tree<_> = (1..=15).collect();
//! assert_eq!(tree.height(), 14);
//! assert!(!tree.is_balanced());
//!
//! tree.rebalance();
//! assert_eq!(tree.height(), 3);
//! assert!(tree.is_balanced());
//! assert!(tree.contains(&7));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod iter;
mod node;
mod tree;
mod util;


pub use error::{Error, Result};
pub use tree::Tree;
