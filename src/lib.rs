//! # ordmaps
//!
//! In-process ordered map engines built from two different tradeoffs:
//!
//! - [`ArrayMap`]: a string-keyed map backed by a flat sorted array of hash
//!   codes with binary-search lookup and lazy tombstone deletion.
//! - [`AvlTreeMap`]: an ordered map over arbitrary keys backed by an
//!   AVL-balanced binary search tree under a caller-supplied total order.
//!
//! Both are single-threaded, synchronous containers intended as building
//! blocks for larger software. The binary-search primitive that underlies
//! `ArrayMap` is exposed as [`search::binary_search`].
//!
//! ## Choosing an engine
//!
//! `ArrayMap` stores entries contiguously and defers the O(n) cost of
//! physical removal: `remove` only tombstones a slot, and tombstones are
//! swept out in a single compaction pass when the map needs the space (or
//! when [`ArrayMap::size`](map::ArrayMap::size) is asked for an exact count). That buys O(log n)
//! point lookups with no per-entry pointer overhead, at the price of a
//! little stale space between compactions.
//!
//! `AvlTreeMap` keeps entries in a height-balanced tree, so every operation
//! is a true O(log n) and entries can be visited in key order, queried by
//! [`lower_bound`](map::AvlTreeMap::lower_bound)/[`upper_bound`](map::AvlTreeMap::upper_bound),
//! or walked front-to-back without ever paying a compaction cost.
//!
//! ## Example
//!
//! ```rust
//! use ordmaps::prelude::*;
//!
//! let mut map = ArrayMap::new(ValueOwnership::Owned);
//! map.insert("a", 1)?;
//! map.insert("b", 2)?;
//! assert_eq!(map.find("b"), Some(&2));
//! map.remove("b");
//! assert_eq!(map.size(), 1);
//!
//! let mut tree = AvlTreeMap::new();
//! tree.insert(3, "three");
//! tree.insert(1, "one");
//! assert_eq!(tree.first(), Some((&1, &"one")));
//! # Ok::<(), ordmaps::map::MapError>(())
//! ```
//!
//! [`ArrayMap`]: map::ArrayMap
//! [`AvlTreeMap`]: map::AvlTreeMap

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types.
///
/// # Usage
///
/// ```rust
/// use ordmaps::prelude::*;
/// ```
pub mod prelude {
    pub use crate::map::{ArrayMap, AvlTreeMap, Comparator, MapError, NaturalOrder, ValueOwnership};
    pub use crate::search::{SearchOutcome, binary_search};
}

pub mod map;
pub mod search;
