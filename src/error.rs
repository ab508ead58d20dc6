use core::error;
use core::fmt;

/// The failure kinds reported by fallible tree queries.
///
/// The tree is a fail-stop component: a failed query returns one of these
/// two conditions to the immediate caller and leaves the tree untouched.
/// Expected conditions are never reported through panics.
///
/// # Examples
///
/// ```
/// use kiri_tree::{Error, OSAvlSet};
///
/// let empty: OSAvlSet<i32> = OSAvlSet::new();
/// assert_eq!(empty.min(), Err(Error::OutOfRange));
///
/// let set = OSAvlSet::from([1, 2, 3]);
/// assert_eq!(set.successor(&3), Err(Error::NotFound));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// A positional query fell outside the tree: `min`/`max` on an empty
    /// tree, or a `select` rank outside `[1, len]`.
    OutOfRange,
    /// No element satisfied the query: removal of an absent element, or a
    /// `successor`/`predecessor` probe with no qualifying element.
    NotFound,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfRange => f.write_str("rank or query out of range"),
            Error::NotFound => f.write_str("element not found"),
        }
    }
}

impl error::Error for Error {}
