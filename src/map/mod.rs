//! Associative-container engines.
//!
//! This module provides two ordered map implementations with different
//! storage strategies:
//!
//! - [`ArrayMap`]: string-keyed, flat sorted-array storage with lazy
//!   tombstone deletion and on-demand compaction
//! - [`AvlTreeMap`]: arbitrary keys under a [`Comparator`] total order,
//!   AVL-balanced binary search tree storage
//!
//! Both engines share the [`ValueOwnership`] configuration, which decides
//! whether a map releases the values it still holds during bulk teardown
//! (`clear` and drop) or leaves their lifetime to the caller.
//!
//! # Examples
//!
//! ## `ArrayMap`
//!
//! ```rust
//! use ordmaps::map::{ArrayMap, ValueOwnership};
//!
//! let mut map = ArrayMap::with_capacity(8, ValueOwnership::Owned)?;
//! map.insert("one", 1)?;
//! map.insert("two", 2)?;
//!
//! assert_eq!(map.find("one"), Some(&1));
//! assert_eq!(map.remove("two"), Some(2));
//! assert_eq!(map.size(), 1);
//! # Ok::<(), ordmaps::map::MapError>(())
//! ```
//!
//! ## `AvlTreeMap`
//!
//! ```rust
//! use ordmaps::map::AvlTreeMap;
//!
//! let mut tree = AvlTreeMap::new();
//! tree.insert(3, "three");
//! tree.insert(1, "one");
//! tree.insert(2, "two");
//!
//! let mut keys = Vec::new();
//! tree.for_each_in_order(|key, _| keys.push(*key));
//! assert_eq!(keys, vec![1, 2, 3]);
//! ```

use core::mem;

// =============================================================================
// Value Ownership
// =============================================================================

/// Decides whether a map releases the values it still holds when it is
/// cleared or dropped.
///
/// Values that leave the map through a point operation (the old value
/// displaced by an overwriting insert, or the value extracted by a remove)
/// are always returned to the caller, in both modes. The ownership mode
/// governs bulk teardown, and bulk insertion through `Extend`, where a
/// displaced value has no caller to go back to.
///
/// With [`Borrowed`](Self::Borrowed), values remaining in the map at
/// `clear`/drop time are handed to [`core::mem::forget`] rather than
/// dropped: the caller is expected to hold their real owning handle
/// elsewhere. Using `Borrowed` with a value type that has no other owner
/// (for example a plain `String`) leaks that value.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ValueOwnership {
    /// The map owns its values and drops them on `clear` and on drop.
    #[default]
    Owned,
    /// The caller retains responsibility for value lifetimes; the map never
    /// drops a value on its own.
    Borrowed,
}

impl ValueOwnership {
    /// Releases a value the map is done with, according to the mode.
    #[inline]
    pub(crate) fn release<V>(self, value: V) {
        match self {
            Self::Owned => drop(value),
            Self::Borrowed => mem::forget(value),
        }
    }
}

mod array;
mod error;
mod tree;

pub use array::ArrayMap;
pub use error::MapError;
pub use tree::AvlTreeMap;
pub use tree::Comparator;
pub use tree::NaturalOrder;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod value_ownership_tests {
    use super::ValueOwnership;
    use rstest::rstest;
    use std::rc::Rc;

    #[rstest]
    fn test_owned_release_drops_the_value() {
        let value = Rc::new(42);
        let weak = Rc::downgrade(&value);
        ValueOwnership::Owned.release(value);
        assert!(weak.upgrade().is_none());
    }

    #[rstest]
    fn test_borrowed_release_keeps_the_value_alive() {
        let value = Rc::new(42);
        let handle = Rc::clone(&value);
        ValueOwnership::Borrowed.release(value);
        // The forgotten clone still counts as a live owner.
        assert_eq!(Rc::strong_count(&handle), 2);
    }

    #[rstest]
    fn test_default_is_owned() {
        assert_eq!(ValueOwnership::default(), ValueOwnership::Owned);
    }
}
