//! This crate exposes an owning Binary Search Tree (BST) of unique elements along with the
//! conversions between a BST and a sorted array.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert and find stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). The [`Tree`] here never rebalances itself, so
//! inserting sorted input degenerates it into a chain. [`Tree::from_sorted`] goes the other way
//! and builds a tree of height `O(lg N)` by always picking the middle element as a subtree's root.
//! Visiting the left subtree, then the subtree root, then the right subtree yields the elements
//! in sorted order, which is how [`Tree::into_sorted_vec`] and [`Tree::inorder`] work.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod display;
pub mod error;
pub mod tree;

pub use error::{Error, UnsortedError};
pub use tree::Tree;
