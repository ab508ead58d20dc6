use super::node_id::NodeId;
use crate::summand::Summand;

/// A single tree vertex with the cached statistics of its subtree.
///
/// The caches are owned by the return path of every mutation: any time a
/// child link changes, `RawAvlTree::update` recomputes height, then size,
/// then sum from the children's (already current) caches.
#[derive(Clone)]
pub(crate) struct AvlNode<T> {
    pub(crate) element: T,
    /// Height of the subtree rooted here. A leaf has height 0; the empty
    /// subtree counts as -1.
    pub(crate) height: i32,
    /// Number of elements in the subtree rooted here, including this one.
    pub(crate) size: usize,
    /// Aggregate of every element in the subtree rooted here, folded in
    /// ascending element order.
    pub(crate) sum: T,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<T: Summand> AvlNode<T> {
    pub(crate) fn leaf(element: T) -> Self {
        let mut sum = T::zero();
        sum.add(&element);
        Self { element, height: 0, size: 1, sum, left: None, right: None }
    }
}
