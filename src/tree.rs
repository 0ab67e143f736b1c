use std::fmt;

use tracing::{debug, instrument, trace};

use crate::error::{Error, Result};
use crate::iter::{Inorder, LevelOrder, Postorder, Preorder};
use crate::node::{Link, Node};
use crate::util::Side;

/// An unbalanced Binary Search Tree. Items are added without any rotation, so the shape of the
/// tree depends on the order they arrive in. [`Tree::rebalance`] rebuilds the tree into a
/// near-minimal height on request.
///
/// Equal items are allowed. They are placed to the right of the items they equal, and lookups
/// locate one of them.
///
/// # Examples
///
/// ```
/// use linked_bst::{Error, Tree};
///
/// let mut tree = Tree::new();
///
/// // Nothing in here yet.
/// assert_eq!(tree.find(&1), None);
///
/// tree.add(1);
/// assert_eq!(tree.find(&1), Some(&1));
///
/// // Removing an item returns it.
/// assert_eq!(tree.remove(&1), Ok(1));
/// assert_eq!(tree.remove(&1), Err(Error::NotFound));
/// ```
pub struct Tree<T> {
    root: Link<T>,
    size: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        Node::dismantle(self.root.take(), drop);
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// The number of items in the tree.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Removes every item from the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree: Tree<_> = [2, 1, 3].into_iter().collect();
    /// tree.clear();
    ///
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.height(), -1);
    /// ```
    #[instrument(level = "trace", skip_all, fields(size = self.size))]
    pub fn clear(&mut self) {
        Node::dismantle(self.root.take(), drop);
        self.size = 0;
    }

    /// The number of edges on the longest path from the root to a leaf. A single item has a
    /// height of `0` and an empty tree has a height of `-1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), -1);
    ///
    /// tree.add(5);
    /// assert_eq!(tree.height(), 0);
    ///
    /// // Sorted input builds a chain.
    /// tree.add(6);
    /// tree.add(7);
    /// assert_eq!(tree.height(), 2);
    /// ```
    pub fn height(&self) -> isize {
        let mut height = -1;
        let mut stack: Vec<(&Node<T>, isize)> =
            self.root.as_deref().into_iter().map(|n| (n, 0)).collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        height
    }

    /// A rough balance check: `true` when the height is less than `2 * lg(size + 1) - 1`.
    ///
    /// This is a necessary condition for a well balanced tree rather than a strict AVL or
    /// red-black check. It compares the actual height against the minimum possible height for
    /// this many items, scaled by a factor of two. An empty tree is balanced.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let chain: Tree<_> = (1..=15).collect();
    /// assert!(!chain.is_balanced());
    ///
    /// let bushy: Tree<_> = [8, 4, 12, 2, 6, 10, 14].into_iter().collect();
    /// assert!(bushy.is_balanced());
    /// ```
    pub fn is_balanced(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        let bound = 2.0 * ((self.size + 1) as f64).log2() - 1.0;
        (self.height() as f64) < bound
    }

    /// Iterates over the items in preorder: each node before its children, left before right.
    /// This is the same order as [`Tree::iter`].
    pub fn preorder(&self) -> Preorder<'_, T> {
        Preorder::new(self.root.as_deref(), self.size)
    }

    /// Iterates over the items in non-decreasing order.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [5, 3, 8, 1, 4].into_iter().collect();
    /// assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 8]);
    /// ```
    pub fn inorder(&self) -> Inorder<'_, T> {
        Inorder::new(self.root.as_deref(), self.size)
    }

    /// Iterates over the items with both subtrees visited before their node.
    pub fn postorder(&self) -> Postorder<'_, T> {
        Postorder::new(self.root.as_deref(), self.size)
    }

    /// Iterates over the items breadth first, one depth level at a time.
    pub fn levelorder(&self) -> LevelOrder<'_, T> {
        LevelOrder::new(self.root.as_deref(), self.size)
    }

    /// Iterates over the items in preorder.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [5, 3, 8, 1, 4].into_iter().collect();
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [5, 3, 1, 4, 8]);
    /// ```
    pub fn iter(&self) -> Preorder<'_, T> {
        self.preorder()
    }
}

impl<T: Ord> Tree<T> {
    /// Potentially finds an item in the tree equal to `item`. If several items are equal to it,
    /// the one closest to the root is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(1);
    ///
    /// assert_eq!(tree.find(&1), Some(&1));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, item: &T) -> Option<&T> {
        let mut node = self.root.as_deref();
        while let Some(n) = node {
            if *item == n.data {
                return Some(&n.data);
            }
            node = n.child(Side::of(item, &n.data));
        }
        None
    }

    /// Whether the tree holds an item equal to `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.find(item).is_some()
    }

    /// Adds `item` as a new leaf. Items less than a node go to its left and every other item goes
    /// to its right, so equal items are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(3);
    /// tree.add(3);
    ///
    /// assert_eq!(tree.size(), 2);
    /// assert_eq!(tree.height(), 1);
    /// ```
    pub fn add(&mut self, item: T) {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            let side = Side::of(&item, &node.data);
            slot = node.child_mut(side);
        }
        *slot = Some(Node::new_boxed(item));
        self.size += 1;
    }

    /// Removes an item equal to `item` from the tree and returns it. Fails with
    /// [`Error::NotFound`] without touching the tree if there is no such item.
    ///
    /// A node with two children keeps its place; its item is replaced by the largest item of its
    /// left subtree, whose node is unlinked instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{Error, Tree};
    ///
    /// let mut tree: Tree<_> = [5, 3, 8, 1, 4].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&5), Ok(5));
    /// assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), [1, 3, 4, 8]);
    /// assert_eq!(tree.remove(&42), Err(Error::NotFound));
    /// ```
    #[instrument(level = "trace", skip_all, fields(size = self.size))]
    pub fn remove(&mut self, item: &T) -> Result<T> {
        if !self.contains(item) {
            trace!("item not found");
            return Err(Error::NotFound);
        }

        // Walk the parent slots down to the one holding the item. Starting from the root slot
        // means removing the root needs no special handling.
        let mut slot = &mut self.root;
        loop {
            let side = match slot.as_deref() {
                Some(node) if *item != node.data => Side::of(item, &node.data),
                _ => break,
            };
            slot = slot.as_mut().unwrap().child_mut(side);
        }

        let mut node = slot.take().ok_or(Error::NotFound)?;
        let removed = if node.right.is_some() {
            match Node::detach_max(&mut node.left) {
                // Two children: lift the predecessor's item into this node.
                Some(predecessor) => {
                    let removed = std::mem::replace(&mut node.data, predecessor);
                    *slot = Some(node);
                    removed
                }
                // Only a right child.
                None => {
                    let Node { data, right, .. } = *node;
                    *slot = right;
                    data
                }
            }
        } else {
            // Only a left child, or a leaf.
            let Node { data, left, .. } = *node;
            *slot = left;
            data
        };

        self.size -= 1;
        trace!(size = self.size, "removed item");
        Ok(removed)
    }

    /// Replaces an item equal to `item` with `new_item` and returns the old item, or `None` if
    /// there is no such item.
    ///
    /// The old item is removed and `new_item` is added in its own place, so the tree stays
    /// ordered even when `new_item` doesn't sort like `item`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree: Tree<_> = [5, 3, 8].into_iter().collect();
    ///
    /// assert_eq!(tree.replace(&3, 9), Some(3));
    /// assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), [5, 8, 9]);
    /// assert_eq!(tree.replace(&3, 1), None);
    /// ```
    pub fn replace(&mut self, item: &T, new_item: T) -> Option<T> {
        let old = self.remove(item).ok()?;
        self.add(new_item);
        Some(old)
    }

    /// Every item `x` with `low <= x <= high`, in preorder.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [5, 3, 8, 1, 4].into_iter().collect();
    /// assert_eq!(tree.range_find(&3, &8), [&5, &3, &4, &8]);
    /// ```
    pub fn range_find(&self, low: &T, high: &T) -> Vec<&T> {
        self.iter().filter(|x| low <= *x && *x <= high).collect()
    }

    /// Rebuilds the tree to a near-minimal height, keeping the same items.
    ///
    /// The items are taken out and sorted, then added back median first: the middle item of a
    /// run goes in before the two halves on either side of it, recursively. Nothing is rotated;
    /// the whole tree is rebuilt. Returns `self` for chaining.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree: Tree<_> = (1..=7).collect();
    /// assert_eq!(tree.height(), 6);
    ///
    /// assert_eq!(tree.rebalance().height(), 2);
    /// assert_eq!(tree.preorder().copied().collect::<Vec<_>>(), [4, 2, 1, 3, 6, 5, 7]);
    /// ```
    #[instrument(level = "debug", skip_all, fields(size = self.size))]
    pub fn rebalance(&mut self) -> &mut Self {
        let before = self.height();

        let mut items = Vec::with_capacity(self.size);
        Node::dismantle(self.root.take(), |item| items.push(item));
        self.size = 0;
        items.sort();

        let mut items: Vec<Option<T>> = items.into_iter().map(Some).collect();
        // Half-open runs of `items` still to be added. The left run is pushed last so it is
        // handled first, matching a recursive left-then-right rebuild.
        let mut runs = vec![(0, items.len())];
        while let Some((start, end)) = runs.pop() {
            if start >= end {
                continue;
            }
            let mid = start + (end - start) / 2;
            if let Some(item) = items[mid].take() {
                self.add(item);
            }
            runs.push((mid + 1, end));
            runs.push((start, mid));
        }

        debug!(before, after = self.height(), "rebalanced");
        self
    }

    /// The smallest item strictly greater than `item`, or `None` if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [5, 3, 8, 1, 4].into_iter().collect();
    /// assert_eq!(tree.successor(&4), Some(&5));
    /// assert_eq!(tree.successor(&6), Some(&8));
    /// assert_eq!(tree.successor(&8), None);
    /// ```
    pub fn successor(&self, item: &T) -> Option<&T> {
        self.inorder().find(|x| *x > item)
    }

    /// The largest item strictly less than `item`, or `None` if there is none. An `item` above
    /// every item in the tree is out of range, so it has no predecessor either.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [5, 3, 8, 1, 4].into_iter().collect();
    /// assert_eq!(tree.predecessor(&5), Some(&4));
    /// assert_eq!(tree.predecessor(&7), Some(&5));
    /// assert_eq!(tree.predecessor(&1), None);
    /// assert_eq!(tree.predecessor(&9), None);
    /// ```
    pub fn predecessor(&self, item: &T) -> Option<&T> {
        let mut prev = None;
        for x in self.inorder() {
            if x >= item {
                return prev;
            }
            prev = Some(x);
        }
        None
    }
}

impl<T: Ord> FromIterator<T> for Tree<T> {
    /// Adds each item in the order given.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for Tree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Preorder<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.preorder()
    }
}

/// Adding the items back in preorder reproduces the same shape.
impl<T> Clone for Tree<T>
where
    T: Clone + Ord,
{
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

/// Renders the tree rotated 90 degrees counterclockwise: the right subtree above its node, the
/// left subtree below, and one `"| "` per level of depth.
///
/// ```text
/// | 8
/// 5
/// | | 4
/// | 3
/// | | 1
/// ```
impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack: Vec<(&Node<T>, usize)> = Vec::new();
        let mut node = self.root.as_deref();
        let mut depth = 0;
        loop {
            while let Some(n) = node {
                stack.push((n, depth));
                node = n.right.as_deref();
                depth += 1;
            }
            let Some((n, d)) = stack.pop() else {
                return Ok(());
            };
            writeln!(f, "{}{}", "| ".repeat(d), n.data)?;
            node = n.left.as_deref();
            depth = d + 1;
        }
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Items<'a, T>(&'a Tree<T>);
        impl<T: fmt::Debug> fmt::Debug for Items<'_, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_list().entries(self.0.inorder()).finish()
            }
        }

        f.debug_struct("Tree")
            .field("size", &self.size)
            .field("items", &Items(self))
            .finish()
    }
}
