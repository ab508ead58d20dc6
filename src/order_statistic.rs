/// A one-based rank into the sorted order of a set.
///
/// `Rank(1)` addresses the smallest element and `Rank(len)` the largest,
/// matching [`select`](crate::OSAvlSet::select) and
/// [`rank`](crate::OSAvlSet::rank).
///
/// # Examples
///
/// ```
/// use kiri_tree::{OSAvlSet, Rank};
///
/// let set = OSAvlSet::from([30, 10, 20]);
///
/// assert_eq!(set[Rank(1)], 10);
/// assert_eq!(set[Rank(3)], 30);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
