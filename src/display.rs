//! Text renderings of a [`Tree`](crate::Tree).
//!
//! Both adaptors borrow the tree and do nothing until formatted, so they can be handed to
//! `println!`, `format!` or `write!` directly.
//!
//! # Examples
//!
//! ```
//! use bintree::display::SidewaysStyle;
//! use bintree::Tree;
//!
//! let tree: Tree<i32> = [2, 1, 3].into_iter().collect();
//!
//! assert_eq!(tree.inorder().to_string(), "1 2 3");
//!
//! let style = SidewaysStyle::new().indent(2).margin(0);
//! assert_eq!(tree.sideways_with(style).to_string(), "  3\n2\n  1\n");
//! ```

use std::fmt;

use crate::tree::Node;

/// Layout knobs for [`Sideways`].
///
/// A node at depth `d` (the root is at depth 0) is indented by `indent * (d + margin)` spaces.
/// The defaults (`indent = 8`, `margin = 2`) put the root sixteen spaces in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SidewaysStyle {
    indent: usize,
    margin: usize,
}

impl Default for SidewaysStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl SidewaysStyle {
    /// The default style.
    pub const fn new() -> Self {
        Self {
            indent: 8,
            margin: 2,
        }
    }

    /// Sets how many spaces each level of depth adds.
    pub const fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets how many levels of indentation every line starts with.
    pub const fn margin(mut self, margin: usize) -> Self {
        self.margin = margin;
        self
    }

    fn width(&self, depth: usize) -> usize {
        self.indent * (depth + self.margin)
    }
}

/// Formats the tree's elements in ascending order, separated by single spaces.
///
/// Created by [`Tree::inorder`](crate::Tree::inorder). An empty tree formats as an empty string.
pub struct Inorder<'a, T> {
    root: Option<&'a Node<T>>,
}

impl<'a, T> Inorder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self { root }
    }
}

impl<T: fmt::Display> fmt::Display for Inorder<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        fmt_inorder(self.root, &mut first, f)
    }
}

fn fmt_inorder<T: fmt::Display>(
    node: Option<&Node<T>>,
    first: &mut bool,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    let Some(node) = node else {
        return Ok(());
    };

    fmt_inorder(node.left(), first, f)?;
    if !*first {
        f.write_str(" ")?;
    }
    *first = false;
    write!(f, "{}", node.value)?;
    fmt_inorder(node.right(), first, f)
}

/// Formats the tree rotated 90° counter-clockwise: the right subtree above its root, the left
/// subtree below, one element per line.
///
/// Created by [`Tree::sideways`](crate::Tree::sideways) and
/// [`Tree::sideways_with`](crate::Tree::sideways_with).
pub struct Sideways<'a, T> {
    root: Option<&'a Node<T>>,
    style: SidewaysStyle,
}

impl<'a, T> Sideways<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, style: SidewaysStyle) -> Self {
        Self { root, style }
    }
}

impl<T: fmt::Display> fmt::Display for Sideways<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_sideways(self.root, 0, &self.style, f)
    }
}

fn fmt_sideways<T: fmt::Display>(
    node: Option<&Node<T>>,
    depth: usize,
    style: &SidewaysStyle,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    let Some(node) = node else {
        return Ok(());
    };

    fmt_sideways(node.right(), depth + 1, style, f)?;
    writeln!(f, "{:width$}{}", "", node.value, width = style.width(depth))?;
    fmt_sideways(node.left(), depth + 1, style, f)
}
