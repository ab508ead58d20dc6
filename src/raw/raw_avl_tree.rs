use core::borrow::Borrow;
use core::cmp::Ordering;

use alloc::vec::Vec;
use smallvec::SmallVec;

use super::arena::Arena;
use super::node::AvlNode;
use super::node_id::NodeId;
use crate::summand::Summand;

/// The core AVL tree backing `OSAvlSet`.
///
/// Nodes live in the arena and refer to each other by `NodeId`. The
/// recursive mutation helpers return the (possibly new) subtree root to
/// their caller, which relinks it into the parent; the iterative queries
/// never touch the structure. Recursion depth is bounded by the AVL height
/// guarantee, ~1.44·log2(n).
pub(crate) struct RawAvlTree<T> {
    /// Arena storing all tree nodes.
    nodes: Arena<AvlNode<T>>,
    /// Link to the root node, if the tree is non-empty.
    root: Option<NodeId>,
    /// Number of elements in the tree.
    len: usize,
}

impl<T: Clone> Clone for RawAvlTree<T> {
    fn clone(&self) -> Self {
        Self { nodes: self.nodes.clone(), root: self.root, len: self.len }
    }
}

impl<T> RawAvlTree<T> {
    pub(crate) const fn new() -> Self {
        Self { nodes: Arena::new(), root: None, len: 0 }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self { nodes: Arena::with_capacity(capacity), root: None, len: 0 }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    pub(crate) fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn node(&self, id: NodeId) -> &AvlNode<T> {
        self.nodes.get(id)
    }

    /// Height of the whole tree: -1 when empty, 0 for a single element.
    pub(crate) fn height(&self) -> i32 {
        self.height_of(self.root)
    }

    /// The root's cached subtree size; 0 when empty.
    pub(crate) fn weight(&self) -> usize {
        self.size_of(self.root)
    }

    fn height_of(&self, link: Option<NodeId>) -> i32 {
        link.map_or(-1, |id| self.nodes.get(id).height)
    }

    fn size_of(&self, link: Option<NodeId>) -> usize {
        link.map_or(0, |id| self.nodes.get(id).size)
    }

    fn balance_of(&self, id: NodeId) -> i32 {
        let node = self.nodes.get(id);
        self.height_of(node.left) - self.height_of(node.right)
    }

    /// The element at one-based `rank` in sorted order, descending by the
    /// cached subtree sizes. `None` covers both an empty tree and a rank
    /// outside `[1, len]`.
    pub(crate) fn select(&self, rank: usize) -> Option<&T> {
        let mut remaining = rank;
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.nodes.get(id);
            let left_size = self.size_of(node.left);
            if remaining == left_size + 1 {
                return Some(&node.element);
            }
            if remaining <= left_size {
                current = node.left;
            } else {
                remaining -= left_size + 1;
                current = node.right;
            }
        }
        None
    }

    /// Moves every element out in ascending order and leaves the tree empty.
    pub(crate) fn drain_in_order(&mut self) -> Vec<T> {
        let mut drained = Vec::with_capacity(self.len);
        let mut stack: SmallVec<[NodeId; 16]> = SmallVec::new();
        let mut current = self.root;
        loop {
            while let Some(id) = current {
                stack.push(id);
                current = self.nodes.get(id).left;
            }
            let Some(id) = stack.pop() else { break };
            let node = self.nodes.take(id);
            drained.push(node.element);
            current = node.right;
        }
        self.root = None;
        self.len = 0;
        drained
    }
}

impl<T: Ord> RawAvlTree<T> {
    pub(crate) fn find<Q>(&self, value: &Q) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.nodes.get(id);
            current = match value.cmp(node.element.borrow()) {
                Ordering::Equal => return Some(id),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    pub(crate) fn min(&self) -> Option<&T> {
        let mut id = self.root?;
        while let Some(left) = self.nodes.get(id).left {
            id = left;
        }
        Some(&self.nodes.get(id).element)
    }

    pub(crate) fn max(&self) -> Option<&T> {
        let mut id = self.root?;
        while let Some(right) = self.nodes.get(id).right {
            id = right;
        }
        Some(&self.nodes.get(id).element)
    }

    /// The smallest element strictly greater than `value`, whether or not
    /// `value` itself is present. Every left turn records the node as the
    /// best candidate so far; the last one recorded wins.
    pub(crate) fn successor<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut candidate = None;
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.nodes.get(id);
            if node.element.borrow() > value {
                candidate = Some(&node.element);
                current = node.left;
            } else {
                current = node.right;
            }
        }
        candidate
    }

    /// Mirror of `successor`: the largest element strictly less than `value`.
    pub(crate) fn predecessor<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut candidate = None;
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.nodes.get(id);
            if node.element.borrow() < value {
                candidate = Some(&node.element);
                current = node.right;
            } else {
                current = node.left;
            }
        }
        candidate
    }

    /// One-based position of `value` in sorted order; 0 when absent.
    ///
    /// A node smaller than `value` contributes itself and its whole left
    /// subtree; a node greater than `value` contributes nothing.
    pub(crate) fn rank_of<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut position = 0;
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.nodes.get(id);
            match value.cmp(node.element.borrow()) {
                Ordering::Less => current = node.left,
                Ordering::Greater => {
                    position += self.size_of(node.left) + 1;
                    current = node.right;
                }
                Ordering::Equal => return position + self.size_of(node.left) + 1,
            }
        }
        0
    }
}

impl<T: Summand> RawAvlTree<T> {
    /// The root's cached aggregate; the identity when empty.
    pub(crate) fn sum(&self) -> T {
        match self.root {
            Some(id) => self.nodes.get(id).sum.clone(),
            None => T::zero(),
        }
    }

    /// Recomputes the caches of `id` from its children: height, then size,
    /// then sum. Must run after any change to either child link, and runs
    /// again inside each rotation that touches the node.
    fn update(&mut self, id: NodeId) {
        let (left, right) = {
            let node = self.nodes.get(id);
            (node.left, node.right)
        };
        let height = 1 + core::cmp::max(self.height_of(left), self.height_of(right));
        let size = 1 + self.size_of(left) + self.size_of(right);
        let mut sum = T::zero();
        if let Some(left) = left {
            sum.add(&self.nodes.get(left).sum);
        }
        sum.add(&self.nodes.get(id).element);
        if let Some(right) = right {
            sum.add(&self.nodes.get(right).sum);
        }

        let node = self.nodes.get_mut(id);
        node.height = height;
        node.size = size;
        node.sum = sum;
    }

    /// Promotes `root`'s right child. The demoted node's caches are
    /// recomputed before the promoted node's, which depend on them.
    fn rotate_left(&mut self, root: NodeId) -> NodeId {
        let promoted = self.nodes.get(root).right.expect("`RawAvlTree::rotate_left()` - no right child!");
        let transplant = self.nodes.get(promoted).left;
        self.nodes.get_mut(root).right = transplant;
        self.nodes.get_mut(promoted).left = Some(root);
        self.update(root);
        self.update(promoted);
        promoted
    }

    /// Mirror of `rotate_left`.
    fn rotate_right(&mut self, root: NodeId) -> NodeId {
        let promoted = self.nodes.get(root).left.expect("`RawAvlTree::rotate_right()` - no left child!");
        let transplant = self.nodes.get(promoted).right;
        self.nodes.get_mut(root).left = transplant;
        self.nodes.get_mut(promoted).right = Some(root);
        self.update(root);
        self.update(promoted);
        promoted
    }

    /// Restores the AVL balance at `id` after an insert or removal below it,
    /// returning the subtree's new root. `id`'s caches must be current.
    fn rebalance(&mut self, id: NodeId) -> NodeId {
        let balance = self.balance_of(id);
        if balance > 1 {
            let left = self.nodes.get(id).left.expect("`RawAvlTree::rebalance()` - left-heavy without a left child!");
            if self.balance_of(left) < 0 {
                let rotated = self.rotate_left(left);
                self.nodes.get_mut(id).left = Some(rotated);
            }
            self.rotate_right(id)
        } else if balance < -1 {
            let right = self.nodes.get(id).right.expect("`RawAvlTree::rebalance()` - right-heavy without a right child!");
            if self.balance_of(right) > 0 {
                let rotated = self.rotate_right(right);
                self.nodes.get_mut(id).right = Some(rotated);
            }
            self.rotate_left(id)
        } else {
            id
        }
    }
}

impl<T: Ord + Summand> RawAvlTree<T> {
    /// Inserts `element`, rejecting duplicates. Returns whether the tree
    /// grew; the count changes only on a confirmed insert.
    pub(crate) fn insert(&mut self, element: T) -> bool {
        let (new_root, inserted) = self.insert_at(self.root, element);
        self.root = Some(new_root);
        self.len += usize::from(inserted);
        inserted
    }

    fn insert_at(&mut self, link: Option<NodeId>, element: T) -> (NodeId, bool) {
        let Some(id) = link else {
            return (self.nodes.alloc(AvlNode::leaf(element)), true);
        };
        match element.cmp(&self.nodes.get(id).element) {
            Ordering::Equal => return (id, false),
            Ordering::Less => {
                let left = self.nodes.get(id).left;
                let (child, inserted) = self.insert_at(left, element);
                if !inserted {
                    return (id, false);
                }
                self.nodes.get_mut(id).left = Some(child);
            }
            Ordering::Greater => {
                let right = self.nodes.get(id).right;
                let (child, inserted) = self.insert_at(right, element);
                if !inserted {
                    return (id, false);
                }
                self.nodes.get_mut(id).right = Some(child);
            }
        }
        self.update(id);
        (self.rebalance(id), true)
    }

    /// Removes `value` and returns the element it matched. The count
    /// changes only on a confirmed removal, and a tree holding its last
    /// element still verifies the match before clearing the root.
    pub(crate) fn remove<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let (new_root, removed) = self.remove_at(self.root, value)?;
        self.root = new_root;
        self.len -= 1;
        Some(removed)
    }

    fn remove_at<Q>(&mut self, link: Option<NodeId>, value: &Q) -> Option<(Option<NodeId>, T)>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let id = link?;
        match value.cmp(self.nodes.get(id).element.borrow()) {
            Ordering::Less => {
                let left = self.nodes.get(id).left;
                let (child, removed) = self.remove_at(left, value)?;
                self.nodes.get_mut(id).left = child;
                self.update(id);
                Some((Some(self.rebalance(id)), removed))
            }
            Ordering::Greater => {
                let right = self.nodes.get(id).right;
                let (child, removed) = self.remove_at(right, value)?;
                self.nodes.get_mut(id).right = child;
                self.update(id);
                Some((Some(self.rebalance(id)), removed))
            }
            Ordering::Equal => Some(self.remove_found(id)),
        }
    }

    fn remove_found(&mut self, id: NodeId) -> (Option<NodeId>, T) {
        let node = self.nodes.get(id);
        match (node.left, node.right) {
            // With at most one child, the node is spliced out and its slot
            // released on the spot.
            (None, None) => (None, self.nodes.take(id).element),
            (Some(child), None) | (None, Some(child)) => {
                (Some(child), self.nodes.take(id).element)
            }
            // With two children, the in-order successor is the minimum of
            // the right subtree: splice it out down there and adopt its
            // element up here. The node itself survives.
            (Some(_), Some(right)) => {
                let (new_right, successor) = self.take_min(right);
                let successor_element = self.nodes.take(successor).element;
                let node = self.nodes.get_mut(id);
                node.right = new_right;
                let removed = core::mem::replace(&mut node.element, successor_element);
                self.update(id);
                (Some(self.rebalance(id)), removed)
            }
        }
    }

    /// Unlinks the minimum node of the subtree at `id`, rebalancing the way
    /// back up. Returns the subtree's new root and the detached node, which
    /// stays in the arena until the caller takes it.
    fn take_min(&mut self, id: NodeId) -> (Option<NodeId>, NodeId) {
        match self.nodes.get(id).left {
            None => (self.nodes.get(id).right, id),
            Some(left) => {
                let (child, min) = self.take_min(left);
                self.nodes.get_mut(id).left = child;
                self.update(id);
                (Some(self.rebalance(id)), min)
            }
        }
    }
}

#[cfg(test)]
impl<T> RawAvlTree<T>
where
    T: Ord + Summand + PartialEq + core::fmt::Debug,
{
    /// Recursively verifies search order, AVL balance, and every cached
    /// height/size/sum against a from-scratch recomputation.
    pub(crate) fn assert_invariants(&self) {
        let size = self.check_subtree(self.root, None, None);
        assert_eq!(size, self.len, "element count does not match the tree");
        assert_eq!(self.nodes.len(), self.len, "arena holds unlinked nodes");
    }

    fn check_subtree(&self, link: Option<NodeId>, lower: Option<&T>, upper: Option<&T>) -> usize {
        let Some(id) = link else { return 0 };
        let node = self.nodes.get(id);

        if let Some(lower) = lower {
            assert!(node.element > *lower, "search order violated at {:?}", node.element);
        }
        if let Some(upper) = upper {
            assert!(node.element < *upper, "search order violated at {:?}", node.element);
        }

        let left_size = self.check_subtree(node.left, lower, Some(&node.element));
        let right_size = self.check_subtree(node.right, Some(&node.element), upper);

        let left_height = self.height_of(node.left);
        let right_height = self.height_of(node.right);
        assert!(
            (left_height - right_height).abs() <= 1,
            "balance violated at {:?}",
            node.element
        );
        assert_eq!(node.height, 1 + left_height.max(right_height), "stale height cache");
        assert_eq!(node.size, 1 + left_size + right_size, "stale size cache");

        let mut sum = T::zero();
        if let Some(left) = node.left {
            sum.add(&self.nodes.get(left).sum);
        }
        sum.add(&node.element);
        if let Some(right) = node.right {
            sum.add(&self.nodes.get(right).sum);
        }
        assert_eq!(node.sum, sum, "stale sum cache");

        1 + left_size + right_size
    }
}
