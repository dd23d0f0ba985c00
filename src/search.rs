//! Binary search over sorted slices with an explicit insertion-point result.
//!
//! This module provides [`binary_search`], the lookup primitive underlying
//! [`ArrayMap`](crate::map::ArrayMap)'s sorted hash array. Unlike
//! `slice::binary_search`, a miss is reported as a tagged
//! [`SearchOutcome::NotFound`] carrying the insertion point that would keep
//! the slice sorted, so callers never decode a magic value.
//!
//! # Examples
//!
//! ```rust
//! use ordmaps::search::{SearchOutcome, binary_search};
//!
//! let sorted = [10, 20, 30, 40];
//! assert_eq!(binary_search(&sorted, &30), SearchOutcome::Found(2));
//! assert_eq!(binary_search(&sorted, &25), SearchOutcome::NotFound(2));
//! assert_eq!(binary_search(&sorted, &5), SearchOutcome::NotFound(0));
//! assert_eq!(binary_search(&sorted, &99), SearchOutcome::NotFound(4));
//! ```

// =============================================================================
// SearchOutcome
// =============================================================================

/// The result of a binary search over a sorted slice.
///
/// Either the index of an exact match, or the index at which the target
/// could be inserted while keeping the slice sorted. The insertion point
/// ranges over `0..=slice.len()` inclusive.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SearchOutcome {
    /// The target was found at this index.
    Found(usize),
    /// The target is absent; inserting it at this index keeps the slice
    /// sorted.
    NotFound(usize),
}

impl SearchOutcome {
    /// Returns `true` if the target was found.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmaps::search::SearchOutcome;
    ///
    /// assert!(SearchOutcome::Found(3).is_found());
    /// assert!(!SearchOutcome::NotFound(0).is_found());
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_found(self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Returns the found index, or `None` on a miss.
    #[inline]
    #[must_use]
    pub const fn found(self) -> Option<usize> {
        match self {
            Self::Found(index) => Some(index),
            Self::NotFound(_) => None,
        }
    }

    /// Returns the index at which the target could be inserted to keep the
    /// slice sorted.
    ///
    /// A found index is its own insertion point (inserting there shifts the
    /// equal element right, which preserves order).
    #[inline]
    #[must_use]
    pub const fn insertion_point(self) -> usize {
        match self {
            Self::Found(index) | Self::NotFound(index) => index,
        }
    }
}

// =============================================================================
// binary_search
// =============================================================================

/// Searches a sorted slice for `target`.
///
/// Classic iterative binary search over a half-open window. The midpoint is
/// computed as `low + (high - low) / 2` so index arithmetic cannot overflow
/// even for slices approaching `usize::MAX` elements.
///
/// If the slice contains several elements equal to `target`, the index of
/// any one of them may be returned.
///
/// # Preconditions
///
/// `slice` must be sorted ascending. On an unsorted slice the result is
/// unspecified (some valid index or insertion point, not necessarily a
/// meaningful one); it is never memory-unsafe.
///
/// # Complexity
///
/// O(log n), no allocation.
///
/// # Examples
///
/// ```rust
/// use ordmaps::search::{SearchOutcome, binary_search};
///
/// let empty: [i64; 0] = [];
/// assert_eq!(binary_search(&empty, &7), SearchOutcome::NotFound(0));
///
/// let sorted: [u32; 3] = [1, 3, 5];
/// assert_eq!(binary_search(&sorted, &3), SearchOutcome::Found(1));
/// assert_eq!(binary_search(&sorted, &4), SearchOutcome::NotFound(2));
/// ```
#[must_use]
pub fn binary_search<T: Ord>(slice: &[T], target: &T) -> SearchOutcome {
    let mut low = 0;
    let mut high = slice.len();

    while low < high {
        let middle = low + (high - low) / 2;

        match slice[middle].cmp(target) {
            core::cmp::Ordering::Less => low = middle + 1,
            core::cmp::Ordering::Greater => high = middle,
            core::cmp::Ordering::Equal => return SearchOutcome::Found(middle),
        }
    }

    SearchOutcome::NotFound(low)
}

// =============================================================================
// Tests
// =============================================================================
