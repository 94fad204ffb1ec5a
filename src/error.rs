//! # Tree errors
//!
//! Most tree operations report failure through `bool` or `Option` (a rejected duplicate, a
//! missing element). [`Error`] is reserved for the bulk conversions where the caller handed us
//! something we can't work with.

use thiserror::Error;

/// Errors from exporting a [`Tree`](crate::Tree) into caller-provided slots.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum Error {
    /// The output slots can't hold every element of the tree.
    #[error("Need {needed} slots to export the tree but only {available} were provided.")]
    Capacity {
        /// How many elements the tree holds.
        needed: usize,
        /// How many slots the caller provided.
        available: usize,
    },
}

/// Returned by [`Tree::try_from_sorted`](crate::Tree::try_from_sorted) when its input isn't
/// strictly ascending. The rejected input can be taken back with [`UnsortedError::into_input`].
#[derive(Error, Debug, PartialEq, Eq, Clone)]
#[error("Input is not strictly ascending at index {index}.")]
pub struct UnsortedError<T> {
    index: usize,
    input: Vec<T>,
}

impl<T> UnsortedError<T> {
    pub(crate) fn new(index: usize, input: Vec<T>) -> Self {
        Self { index, input }
    }

    /// Index of the first element that isn't greater than its predecessor.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Gives back the rejected input, untouched.
    pub fn into_input(self) -> Vec<T> {
        self.input
    }
}
