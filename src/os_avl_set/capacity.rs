use super::OSAvlSet;
use crate::raw::RawAvlTree;

impl<T> OSAvlSet<T> {
    /// Creates an empty set with node storage for at least `capacity`
    /// elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use kiri_tree::OSAvlSet;
    ///
    /// let set: OSAvlSet<i32> = OSAvlSet::with_capacity(16);
    /// assert!(set.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OSAvlSet { raw: RawAvlTree::with_capacity(capacity) }
    }

    /// Returns the current node-storage capacity of the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use kiri_tree::OSAvlSet;
    ///
    /// let set: OSAvlSet<i32> = OSAvlSet::with_capacity(32);
    /// assert_eq!(set.capacity(), 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
