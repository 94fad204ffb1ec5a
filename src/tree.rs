//! An owning, unbalanced BST of unique elements. Each `Node` owns its children through a `Box` so
//! the tree is the sole owner of every element it holds.
//!
//! # Examples
//!
//! ```
//! use bintree::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.is_empty());
//! assert_eq!(tree.retrieve(&50), None);
//!
//! for x in [50, 30, 70, 20, 40] {
//!     assert!(tree.insert(x));
//! }
//!
//! // Duplicates are rejected.
//! assert!(!tree.insert(30));
//!
//! assert_eq!(tree.to_string(), "20 30 40 50 70");
//! assert_eq!(tree.sibling(&30), Some(&70));
//! assert_eq!(tree.parent(&30), Some(&50));
//! assert_eq!(tree.parent(&50), None);
//!
//! // Exporting moves every element out and leaves the tree empty.
//! let sorted = tree.into_sorted_vec();
//! assert_eq!(sorted, [20, 30, 40, 50, 70]);
//! assert!(tree.is_empty());
//!
//! // Importing builds a balanced tree around the midpoint.
//! let tree = Tree::from_sorted(sorted);
//! assert_eq!(tree.parent(&20), Some(&40));
//! assert_eq!(tree.parent(&50), Some(&40));
//! assert_eq!(tree.parent(&70), Some(&50));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::io;

use log::{debug, trace};

use crate::display::{Inorder, Sideways, SidewaysStyle};
use crate::error::{Error, UnsortedError};

type Link<T> = Option<Box<Node<T>>>;

/// A Binary Search Tree holding unique elements. Inserting an element equal to one already in the
/// tree is rejected. The tree never rebalances so its shape is decided by insertion order, or by
/// [`Tree::from_sorted`] which builds a balanced tree from sorted input.
pub struct Tree<T> {
    root: Link<T>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Deep copy. Every node is freshly allocated and every element is cloned, so the copy shares
/// nothing with the original.
impl<T: Clone> Clone for Tree<T> {
    fn clone(&self) -> Self {
        Self {
            root: Node::copy(self.root.as_deref()),
        }
    }

    /// Drops the current contents and then copies `source`.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.root = Node::copy(source.root.as_deref());
    }
}

/// Structural equality. Two trees are equal when they have the same shape and the elements at
/// each position are equal. Two trees holding the same elements in different shapes are _not_
/// equal.
impl<T: PartialEq> PartialEq for Tree<T> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self.root.as_deref(), other.root.as_deref())];
        while let Some(pair) = pending.pop() {
            match pair {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    if a.value != b.value {
                        return false;
                    }
                    pending.push((a.right(), b.right()));
                    pending.push((a.left(), b.left()));
                }
                _ => return false,
            }
        }

        true
    }
}

impl<T: Eq> Eq for Tree<T> {}

/// Prints the nodes as nested structs. The nesting (and the recursion producing it) is one level
/// per level of the tree, so a tree degenerated into a long chain can overflow the stack here.
impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree").field("root", &self.root).finish()
    }
}

/// Writes the elements in ascending order separated by spaces. See [`Tree::inorder`].
impl<T: fmt::Display> fmt::Display for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inorder(), f)
    }
}

impl<T: Ord> FromIterator<T> for Tree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

/// Inserts each element in turn. Duplicates are dropped.
impl<T: Ord> Extend<T> for Tree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub const fn new() -> Self {
        Self { root: None }
    }

    /// Returns `true` if the tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drops every node and element in the tree, leaving it empty. Children are dropped before
    /// their parents. Calling this on an empty tree does nothing.
    ///
    /// This uses an explicit stack so even a tree degenerated into a long chain can be cleared.
    pub fn clear(&mut self) {
        let mut pending: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            let left = node.left.take();
            let right = node.right.take();
            if left.is_none() && right.is_none() {
                drop(node);
                continue;
            }

            // Come back to this node once both of its (now detached) subtrees are gone.
            pending.push(node);
            pending.extend(right);
            pending.extend(left);
        }
    }

    /// Counts the elements in the tree. This walks the whole tree.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut pending: Vec<&Node<T>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.left());
            pending.extend(node.right());
        }

        count
    }

    /// The number of nodes on the longest path from the root to a leaf. An empty tree has height
    /// 0 and a lone root has height 1.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut pending: Vec<(&Node<T>, usize)> =
            self.root.as_deref().map(|root| (root, 1)).into_iter().collect();
        while let Some((node, depth)) = pending.pop() {
            height = height.max(depth);
            pending.extend(node.left().map(|n| (n, depth + 1)));
            pending.extend(node.right().map(|n| (n, depth + 1)));
        }

        height
    }

    /// Moves every element into `slots` in ascending order and leaves the tree empty. Returns how
    /// many slots were filled. Slots past that count are left untouched.
    ///
    /// This is destructive on purpose: the elements are moved, not cloned, and the tree can be
    /// reused as empty storage afterwards. If `slots` is too short to hold every element, nothing
    /// is moved and [`Error::Capacity`] is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::Tree;
    ///
    /// let mut tree: Tree<_> = [2, 3, 1].into_iter().collect();
    /// let mut slots = [None; 4];
    ///
    /// assert_eq!(tree.drain_into(&mut slots), Ok(3));
    /// assert_eq!(slots, [Some(1), Some(2), Some(3), None]);
    /// assert!(tree.is_empty());
    /// ```
    pub fn drain_into(&mut self, slots: &mut [Option<T>]) -> Result<usize, Error> {
        let needed = self.len();
        if slots.len() < needed {
            debug!(
                "Refusing to export {} elements into {} slots",
                needed,
                slots.len()
            );
            return Err(Error::Capacity {
                needed,
                available: slots.len(),
            });
        }

        let mut slots = slots.iter_mut();
        self.drain_with(&mut |value| {
            if let Some(slot) = slots.next() {
                *slot = Some(value);
            }
        });

        trace!("Exported {} elements", needed);
        Ok(needed)
    }

    /// Moves every element out of the tree in ascending order, leaving the tree empty. See
    /// [`Tree::drain_into`].
    pub fn into_sorted_vec(&mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len());
        self.drain_with(&mut |value| sorted.push(value));
        trace!("Exported {} elements", sorted.len());
        sorted
    }

    fn drain_with(&mut self, sink: &mut impl FnMut(T)) {
        if let Some(root) = self.root.take() {
            root.drain(sink);
        }
    }

    /// Replaces the contents of the tree with a balanced tree built from the sorted elements in
    /// `slots`. Elements are read up to the first `None` and each one read is taken out of its
    /// slot. Returns how many elements were taken.
    ///
    /// The elements must already be in strictly ascending order. Each subtree's root is the
    /// element at the midpoint of its range (the lower one for even lengths), so the resulting
    /// height is `O(lg N)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::Tree;
    ///
    /// let mut slots = [Some(10), Some(20), Some(30), Some(40), None, Some(99)];
    /// let mut tree = Tree::new();
    ///
    /// assert_eq!(tree.fill_from(&mut slots), 4);
    /// assert_eq!(tree.to_string(), "10 20 30 40");
    /// assert_eq!(tree.parent(&10), Some(&20));
    /// assert_eq!(slots, [None, None, None, None, None, Some(99)]);
    /// ```
    pub fn fill_from(&mut self, slots: &mut [Option<T>]) -> usize
    where
        T: Ord,
    {
        self.clear();

        let size = slots.iter().take_while(|slot| slot.is_some()).count();
        self.root = Node::build_balanced(&mut slots[..size]);

        debug_assert!(self.is_search_tree(), "Imported elements weren't sorted");
        trace!("Imported {} elements", size);
        size
    }

    /// Replaces the contents of the tree with a balanced tree built from `sorted`. See
    /// [`Tree::fill_from`].
    pub fn rebuild_from_sorted(&mut self, sorted: Vec<T>)
    where
        T: Ord,
    {
        let mut slots: Vec<Option<T>> = sorted.into_iter().map(Some).collect();
        self.fill_from(&mut slots);
    }

    /// Builds a balanced tree from elements that are already in strictly ascending order. See
    /// [`Tree::fill_from`] and, for input that hasn't been checked, [`Tree::try_from_sorted`].
    pub fn from_sorted(sorted: Vec<T>) -> Self
    where
        T: Ord,
    {
        let mut tree = Self::new();
        tree.rebuild_from_sorted(sorted);
        tree
    }

    /// Like [`Tree::from_sorted`] but first checks that `sorted` is strictly ascending, which
    /// also rules out duplicates. Rejected input is handed back inside the [`UnsortedError`].
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::Tree;
    ///
    /// assert!(Tree::try_from_sorted(vec![1, 2, 3]).is_ok());
    ///
    /// let err = Tree::try_from_sorted(vec![1, 3, 2]).unwrap_err();
    /// assert_eq!(err.index(), 2);
    /// assert_eq!(err.into_input(), [1, 3, 2]);
    /// ```
    pub fn try_from_sorted(sorted: Vec<T>) -> Result<Self, UnsortedError<T>>
    where
        T: Ord,
    {
        if let Some(index) = sorted.windows(2).position(|pair| pair[0] >= pair[1]) {
            debug!("Rejecting unsorted input at index {}", index + 1);
            return Err(UnsortedError::new(index + 1, sorted));
        }

        Ok(Self::from_sorted(sorted))
    }

    /// Returns a [`Display`](fmt::Display)able view of the elements in ascending order, separated
    /// by single spaces. This doesn't modify the tree.
    ///
    /// Formatting recurses once per level of the tree, so very tall (unbalanced) trees can
    /// overflow the stack. [`Tree::into_sorted_vec`] has no such limit.
    pub fn inorder(&self) -> Inorder<'_, T> {
        Inorder::new(self.root.as_deref())
    }

    /// Writes the elements in ascending order on a single line. See [`Tree::inorder`].
    pub fn write_inorder<W: io::Write>(&self, mut out: W) -> io::Result<()>
    where
        T: fmt::Display,
    {
        writeln!(out, "{}", self.inorder())
    }

    /// Returns a [`Display`](fmt::Display)able view of the tree lying on its side using the
    /// default [`SidewaysStyle`]. Like [`Tree::inorder`], formatting recurses once per level.
    pub fn sideways(&self) -> Sideways<'_, T> {
        self.sideways_with(SidewaysStyle::default())
    }

    /// Like [`Tree::sideways`] with an explicit layout.
    pub fn sideways_with(&self, style: SidewaysStyle) -> Sideways<'_, T> {
        Sideways::new(self.root.as_deref(), style)
    }

    /// Writes the tree lying on its side. See [`Tree::sideways`].
    pub fn write_sideways<W: io::Write>(&self, mut out: W) -> io::Result<()>
    where
        T: fmt::Display,
    {
        write!(out, "{}", self.sideways())
    }
}

impl<T: Ord> Tree<T> {
    /// Inserts `value` into the tree. Returns `false`, dropping `value` and leaving the tree as it
    /// was, if an equal element is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let mut depth = 0;
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match value.cmp(&node.value) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => {
                    debug!("Rejected duplicate element at depth {}", depth);
                    return false;
                }
            };
            depth += 1;
        }

        *slot = Some(Node::new_boxed(value));
        trace!("Inserted element at depth {}", depth);
        true
    }

    /// Potentially finds the stored element equal to `target`. If no element matches, `None` is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.retrieve(&1), Some(&1));
    /// assert_eq!(tree.retrieve(&42), None);
    /// ```
    pub fn retrieve(&self, target: &T) -> Option<&T> {
        self.find_node(target).map(|node| &node.value)
    }

    /// Returns `true` if an element equal to `target` is in the tree.
    pub fn contains(&self, target: &T) -> bool {
        self.find_node(target).is_some()
    }

    /// Finds the element sharing a parent with `target`.
    ///
    /// The search visits the whole tree recursively, so its stack use grows with the tree's
    /// height. A tree degenerated into a chain of many thousands of nodes can overflow the stack.
    ///
    /// Returns `None` when the tree is empty, `target` is the root (which has no siblings),
    /// `target` isn't in the tree, or `target`'s parent has only one child.
    pub fn sibling(&self, target: &T) -> Option<&T> {
        let root = self.root.as_deref()?;
        if root.value == *target {
            return None;
        }

        root.sibling_of(target)
    }

    /// Finds the element whose node has `target` as a child.
    ///
    /// Like [`Tree::sibling`], this recurses once per level of the tree.
    ///
    /// Returns `None` when the tree is empty, `target` is the root (which has no parent) or
    /// `target` isn't in the tree.
    pub fn parent(&self, target: &T) -> Option<&T> {
        let root = self.root.as_deref()?;
        if root.value == *target {
            return None;
        }

        root.parent_of(target)
    }

    fn find_node(&self, target: &T) -> Option<&Node<T>> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match target.cmp(&node.value) {
                Ordering::Less => node.left(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => node.right(),
            };
        }

        None
    }

    /// Checks the ordering invariant: an in-order walk is strictly ascending.
    pub(crate) fn is_search_tree(&self) -> bool {
        let mut previous: Option<&T> = None;
        let mut pending: Vec<&Node<T>> = Vec::new();
        let mut current = self.root.as_deref();
        loop {
            while let Some(node) = current {
                pending.push(node);
                current = node.left();
            }
            let Some(node) = pending.pop() else {
                return true;
            };
            if previous.map_or(false, |previous| *previous >= node.value) {
                return false;
            }
            previous = Some(&node.value);
            current = node.right();
        }
    }
}

/// A `Node` owns one element and up to two children. It has no link back to its parent; parent
/// and sibling lookups search down from the root instead.
pub(crate) struct Node<T> {
    pub(crate) value: T,
    left: Link<T>,
    right: Link<T>,
}

// Recursive through `left` and `right`; see the note on `Debug for Tree`.
impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

impl<T> Node<T> {
    fn new_boxed(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
        })
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Deep copies the subtree rooted at `root`.
    ///
    /// Walks the source with an explicit stack. A `Visit` of a node schedules its `Build` after
    /// visits of both children; by the time `Build` runs, the copies of its children are the top
    /// two entries of `built`.
    fn copy(root: Option<&Self>) -> Link<T>
    where
        T: Clone,
    {
        enum Step<'a, T> {
            Visit(Option<&'a Node<T>>),
            Build(&'a Node<T>),
        }

        let mut steps = vec![Step::Visit(root)];
        let mut built: Vec<Link<T>> = Vec::new();
        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(None) => built.push(None),
                Step::Visit(Some(node)) => {
                    steps.push(Step::Build(node));
                    steps.push(Step::Visit(node.right()));
                    steps.push(Step::Visit(node.left()));
                }
                Step::Build(node) => {
                    let right = built.pop().flatten();
                    let left = built.pop().flatten();
                    built.push(Some(Box::new(Self {
                        value: node.value.clone(),
                        left,
                        right,
                    })));
                }
            }
        }

        debug_assert_eq!(built.len(), 1);
        built.pop().flatten()
    }

    /// Moves every element of this subtree into `sink` in ascending order, dropping the nodes as
    /// it goes.
    ///
    /// In-order walk with an explicit stack: the left spine is detached and stacked, and once a
    /// node is popped its right child's left spine goes on next.
    fn drain(self: Box<Self>, sink: &mut impl FnMut(T)) {
        let mut pending: Vec<Box<Self>> = Vec::new();
        let mut current = Some(self);
        loop {
            while let Some(mut node) = current {
                current = node.left.take();
                pending.push(node);
            }
            let Some(node) = pending.pop() else {
                return;
            };

            let Self { value, right, .. } = *node;
            sink(value);
            current = right;
        }
    }

    /// Builds a balanced subtree from the sorted, fully populated `slots`, taking each element out
    /// of its slot.
    fn build_balanced(slots: &mut [Option<T>]) -> Link<T> {
        if slots.is_empty() {
            return None;
        }

        // Lower midpoint of the inclusive range [0, len - 1].
        let mid = (slots.len() - 1) / 2;
        let (left, rest) = slots.split_at_mut(mid);
        let (pivot, right) = rest.split_first_mut()?;
        let value = pivot.take()?;

        Some(Box::new(Self {
            value,
            left: Self::build_balanced(left),
            right: Self::build_balanced(right),
        }))
    }

    /// Searches this subtree, left side first, for a node with `target` as a child and returns
    /// that child's sibling. Recurses once per level.
    fn sibling_of(&self, target: &T) -> Option<&T>
    where
        T: PartialEq,
    {
        if self.right().map_or(false, |right| right.value == *target) {
            return self.left().map(|left| &left.value);
        }
        if self.left().map_or(false, |left| left.value == *target) {
            return self.right().map(|right| &right.value);
        }

        self.left()
            .and_then(|left| left.sibling_of(target))
            .or_else(|| self.right().and_then(|right| right.sibling_of(target)))
    }

    /// Searches this subtree for a node with `target` as a child and returns that node's element.
    /// A node's own children are checked before descending into them.
    fn parent_of(&self, target: &T) -> Option<&T>
    where
        T: PartialEq,
    {
        let is_target = |child: Option<&Self>| child.map_or(false, |child| child.value == *target);
        if is_target(self.right()) || is_target(self.left()) {
            return Some(&self.value);
        }

        self.right()
            .and_then(|right| right.parent_of(target))
            .or_else(|| self.left().and_then(|left| left.parent_of(target)))
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a `BTreeSet`, checking each result against the
    /// set along the way.
    fn do_ops<T>(ops: &[Op<T>], tree: &mut Tree<T>, set: &mut BTreeSet<T>)
    where
        T: Ord + Clone + fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Insert(x) => {
                    assert_eq!(tree.insert(x.clone()), set.insert(x.clone()));
                }
                Op::Retrieve(x) => {
                    assert_eq!(tree.retrieve(x), set.get(x));
                }
                Op::Sibling(x) => {
                    if let Some(sibling) = tree.sibling(x) {
                        assert_eq!(tree.sibling(sibling), Some(x));
                        assert_eq!(tree.parent(sibling), tree.parent(x));
                    }
                }
                Op::Parent(x) => {
                    if let Some(parent) = tree.parent(x) {
                        let node = tree.find_node(parent).expect("Parent is in the tree");
                        let is_child = |child: Option<&Node<T>>| child.map(|c| &c.value) == Some(x);
                        assert!(is_child(node.left()) || is_child(node.right()));
                    } else {
                        assert!(!set.contains(x) || root_is(tree, x));
                    }
                }
                Op::RoundTrip => {
                    let sorted = tree.into_sorted_vec();
                    assert!(tree.is_empty());
                    assert!(sorted.iter().eq(set.iter()));
                    tree.rebuild_from_sorted(sorted);
                }
                Op::Clone => {
                    let copy = tree.clone();
                    assert!(copy == *tree);
                }
            }
            assert!(tree.is_search_tree());
        }
    }

    fn root_is<T: PartialEq>(tree: &Tree<T>, x: &T) -> bool {
        tree.root.as_ref().map_or(false, |root| root.value == *x)
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set);
            tree.len() == set.len() && set.iter().all(|x| tree.retrieve(x) == Some(x))
        }
    }

    quickcheck::quickcheck! {
        fn sorted_regardless_of_insertion_order(xs: Vec<i16>) -> bool {
            let mut tree: Tree<_> = xs.iter().copied().collect();
            let expected: BTreeSet<_> = xs.into_iter().collect();

            tree.into_sorted_vec().into_iter().eq(expected)
        }
    }

    quickcheck::quickcheck! {
        fn rebuilt_trees_are_balanced(xs: BTreeSet<i16>) -> bool {
            let len = xs.len();
            let tree = Tree::from_sorted(xs.into_iter().collect());
            let min_height = (usize::BITS - len.leading_zeros()) as usize;

            tree.len() == len && tree.height() == min_height
        }
    }
}
