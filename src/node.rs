use crate::util::Side;

/// An owning link to a subtree. `None` marks the empty slot below a leaf.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// A single item of the tree and the two subtrees it exclusively owns.
pub(crate) struct Node<T> {
    pub(crate) data: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    /// Construct a new leaf holding `data`.
    pub(crate) fn new_boxed(data: T) -> Box<Self> {
        Box::new(Self {
            data,
            left: None,
            right: None,
        })
    }

    pub(crate) fn child(&self, side: Side) -> Option<&Self> {
        match side {
            Side::Left => self.left.as_deref(),
            Side::Right => self.right.as_deref(),
        }
    }

    pub(crate) fn child_mut(&mut self, side: Side) -> &mut Link<T> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Unlinks the largest node of the subtree held in `slot` and returns its item. The largest
    /// node has no right child by definition, so its left child (if any) takes its place.
    ///
    /// Returns `None` when `slot` is empty.
    ///
    /// # Diagram
    ///
    /// ```text
    ///    slot                 slot
    ///     |                    |
    ///     a                    a
    ///    / \                  / \
    ///   x   max    detach -> x   y
    ///       /
    ///      y
    /// ```
    pub(crate) fn detach_max(slot: &mut Link<T>) -> Option<T> {
        let mut slot = slot;
        while slot.as_ref().is_some_and(|node| node.right.is_some()) {
            slot = &mut slot.as_mut().unwrap().right;
        }

        let max = slot.take()?;
        let Node { data, left, .. } = *max;
        *slot = left;
        Some(data)
    }

    /// Tears down the subtree in `link` without recursing, handing each item to `sink` in
    /// preorder. Every node is released with no children attached so dropping a chain of any
    /// length uses constant stack.
    pub(crate) fn dismantle(link: Link<T>, mut sink: impl FnMut(T)) {
        let mut stack: Vec<Box<Self>> = link.into_iter().collect();
        while let Some(node) = stack.pop() {
            let Node { data, left, right } = *node;
            stack.extend(right);
            stack.extend(left);
            sink(data);
        }
    }
}
