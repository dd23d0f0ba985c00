//! Flat sorted-array map with lazy tombstone deletion.
//!
//! This module provides [`ArrayMap`], a string-keyed ordered map backed by
//! two parallel buffers: a sorted array of 32-bit hash codes and an array of
//! slots holding the entries. Lookup binary-searches the hash array and then
//! resolves equal-hash collisions by comparing keys in both directions.
//!
//! # Lazy deletion
//!
//! `remove` never shifts the tail of the array. It replaces the slot with a
//! tombstone and leaves the hash/key in place, so removal costs O(log n)
//! search plus O(1) bookkeeping. The O(n) cost of physical removal is
//! deferred to a single compaction sweep that runs only on demand: when
//! [`ArrayMap::size`] needs an exact count, when an insert finds the buffer
//! full while tombstones exist, or before [`ArrayMap::take`]/[`ArrayMap::swap`]
//! transfer storage. An insert whose sorted position lands on a tombstone
//! reuses that slot in place without shifting anything.
//!
//! # Keys
//!
//! Keys are copied into the map. Storage is inline for keys up to 24 bytes
//! and spills to the heap beyond that, so arbitrarily long keys are accepted
//! with bounds-checked copies.
//!
//! # Examples
//!
//! ```rust
//! use ordmaps::map::{ArrayMap, ValueOwnership};
//!
//! let mut map = ArrayMap::with_capacity(8, ValueOwnership::Owned)?;
//! map.insert("a", 1)?;
//! map.insert("b", 2)?;
//! map.insert("c", 3)?;
//!
//! assert_eq!(map.find("b"), Some(&2));
//! assert_eq!(map.remove("b"), Some(2));
//! assert_eq!(map.find("b"), None);
//! assert_eq!(map.size(), 2);
//! # Ok::<(), ordmaps::map::MapError>(())
//! ```

use core::fmt;
use core::mem;

use smallvec::SmallVec;

use crate::map::{MapError, ValueOwnership};
use crate::search::{SearchOutcome, binary_search};

/// Capacity used when none is requested (or when a fresh map grows for the
/// first time).
const DEFAULT_CAPACITY: usize = 8;

/// Keys up to this many bytes are stored inline in the slot; longer keys
/// spill to the heap.
const INLINE_KEY_BYTES: usize = 24;

// =============================================================================
// String hash
// =============================================================================

const HASH_MULTIPLIER: u64 = 2_654_435_789;
const HASH_SEED: u64 = 0;
const HASH_SEED_SALT: u64 = 104_395_301;

/// Seeded 64-bit multiplicative string hash.
fn quick_hash(key: &str, seed: u64) -> u64 {
    let mut mix = seed ^ HASH_SEED_SALT;

    for &byte in key.as_bytes() {
        mix = mix.wrapping_add(u64::from(byte).wrapping_mul(HASH_MULTIPLIER) ^ (mix >> 23));
    }

    mix ^ (mix << 37)
}

/// The hash code stored in the sorted array.
///
/// The 64-bit hash is truncated to a fixed-width 32-bit code so the sorted
/// array stays dense; equal codes from distinct keys are resolved by key
/// comparison during lookup.
#[allow(clippy::cast_possible_truncation)]
fn hash_code(key: &str) -> u32 {
    quick_hash(key, HASH_SEED) as u32
}

// =============================================================================
// Key storage
// =============================================================================

/// Owned key bytes, inline up to [`INLINE_KEY_BYTES`].
#[derive(Clone, PartialEq, Eq)]
struct Key(SmallVec<[u8; INLINE_KEY_BYTES]>);

impl Key {
    #[inline]
    fn copied_from(key: &str) -> Self {
        Self(SmallVec::from_slice(key.as_bytes()))
    }

    #[inline]
    fn empty() -> Self {
        Self(SmallVec::new())
    }

    #[inline]
    fn matches(&self, key: &str) -> bool {
        self.0.as_slice() == key.as_bytes()
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:?}", String::from_utf8_lossy(&self.0))
    }
}

// =============================================================================
// Slots
// =============================================================================

/// One slot of the entry array.
///
/// A slot past the live region does not exist at all (the backing `Vec`
/// ends there), so occupancy needs only two explicit states.
#[derive(Debug)]
enum Slot<V> {
    /// A live entry.
    Occupied { key: Key, value: V },
    /// A logically removed entry awaiting compaction. The key is kept so
    /// that re-inserting the same key can revive the slot in place.
    Tombstone { key: Key },
}

impl<V> Slot<V> {
    #[inline]
    const fn key(&self) -> &Key {
        match self {
            Self::Occupied { key, .. } | Self::Tombstone { key } => key,
        }
    }

    #[inline]
    const fn is_tombstone(&self) -> bool {
        matches!(self, Self::Tombstone { .. })
    }
}

/// Where a key lives, or where it would go.
enum Location {
    /// Index of the slot whose key matches (live or tombstoned).
    Key(usize),
    /// Index at which a new entry keeps the hash array sorted.
    Gap(usize),
}

// =============================================================================
// ArrayMap
// =============================================================================

/// An ordered map keyed by string, backed by a flat sorted array of hash
/// codes with binary-search lookup and lazy tombstone deletion.
///
/// Entries are kept sorted by a 32-bit hash of the key, so point lookups are
/// O(log n) with no per-entry pointer overhead. Removal is lazy: it
/// tombstones the slot in O(1) after the search, and tombstones are swept
/// out in batched compaction passes that run only on demand. The tradeoff
/// is a small amount of stale space between compactions.
///
/// # Time Complexity
///
/// | Operation        | Complexity                        |
/// |------------------|-----------------------------------|
/// | `new`            | O(1), no allocation               |
/// | `find`           | O(log n) + collision run          |
/// | `insert`         | O(n) worst case, amortized better |
/// | `remove`         | O(log n)                          |
/// | `size`           | O(n) when garbage is pending, else O(1) |
/// | `clear`          | O(n)                              |
/// | `take` / `swap`  | O(n) when garbage is pending, else O(1) |
///
/// # Examples
///
/// ```rust
/// use ordmaps::map::{ArrayMap, ValueOwnership};
///
/// let mut map = ArrayMap::new(ValueOwnership::Owned);
/// map.insert("answer", 42)?;
///
/// assert_eq!(map.find("answer"), Some(&42));
/// assert_eq!(map.insert("answer", 54)?, Some(42));
/// # Ok::<(), ordmaps::map::MapError>(())
/// ```
pub struct ArrayMap<V> {
    /// Sorted ascending over the live region; ties are equal-hash collisions.
    hashes: Vec<u32>,
    /// Parallel to `hashes`, index for index.
    slots: Vec<Slot<V>>,
    /// Logical slot budget shared by both buffers. Growth doubles it.
    capacity: usize,
    /// Whether any slot in the live region is a tombstone.
    garbage: bool,
    ownership: ValueOwnership,
}

impl<V> ArrayMap<V> {
    /// Creates a new empty map.
    ///
    /// No buffer space is allocated until the first insert, which reserves
    /// the default capacity of 8 slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmaps::map::{ArrayMap, ValueOwnership};
    ///
    /// let mut map: ArrayMap<i32> = ArrayMap::new(ValueOwnership::Owned);
    /// assert_eq!(map.size(), 0);
    /// assert_eq!(map.capacity(), 0);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new(ownership: ValueOwnership) -> Self {
        Self {
            hashes: Vec::new(),
            slots: Vec::new(),
            capacity: 0,
            garbage: false,
            ownership,
        }
    }

    /// Creates a new empty map with at least `capacity` slots reserved.
    ///
    /// A requested capacity of zero becomes the default of 8. Buffer space
    /// is reserved through fallible allocation, so running out of memory is
    /// reported as [`MapError::AllocationFailed`] instead of aborting.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::AllocationFailed`] if the allocator cannot
    /// provide the buffers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmaps::map::{ArrayMap, ValueOwnership};
    ///
    /// let map: ArrayMap<i32> = ArrayMap::with_capacity(32, ValueOwnership::Owned)?;
    /// assert_eq!(map.capacity(), 32);
    /// # Ok::<(), ordmaps::map::MapError>(())
    /// ```
    pub fn with_capacity(capacity: usize, ownership: ValueOwnership) -> Result<Self, MapError> {
        let mut map = Self::new(ownership);
        let capacity = if capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            capacity
        };
        map.reserve_total(capacity)?;
        Ok(map)
    }

    /// Returns the number of live entries.
    ///
    /// If any removals are pending, the map is compacted first, so after
    /// this call the storage holds no tombstones.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmaps::map::{ArrayMap, ValueOwnership};
    ///
    /// let mut map = ArrayMap::new(ValueOwnership::Owned);
    /// map.insert("a", 1)?;
    /// map.insert("b", 2)?;
    /// map.remove("a");
    /// assert_eq!(map.size(), 1);
    /// # Ok::<(), ordmaps::map::MapError>(())
    /// ```
    pub fn size(&mut self) -> usize {
        if self.garbage {
            self.compact();
        }

        self.hashes.len()
    }

    /// Returns the allocated slot budget.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the ownership mode chosen at construction.
    #[inline]
    #[must_use]
    pub const fn ownership(&self) -> ValueOwnership {
        self.ownership
    }

    /// Inserts a key/value pair.
    ///
    /// If the key is already present, its value is replaced and the old
    /// value is returned to the caller. If the key was removed and its
    /// tombstone still exists, the slot is revived in place. Otherwise the
    /// entry is placed at its sorted position: a tombstone at that position
    /// is overwritten without shifting; a full buffer with pending garbage
    /// is compacted first; and only then does the map shift the tail or
    /// double its capacity.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::AllocationFailed`] if growing the buffers fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmaps::map::{ArrayMap, ValueOwnership};
    ///
    /// let mut map = ArrayMap::new(ValueOwnership::Owned);
    /// assert_eq!(map.insert("k", 1)?, None);
    /// assert_eq!(map.insert("k", 2)?, Some(1));
    /// # Ok::<(), ordmaps::map::MapError>(())
    /// ```
    pub fn insert(&mut self, key: &str, value: V) -> Result<Option<V>, MapError> {
        self.insert_hashed(hash_code(key), key, value)
    }

    /// Removes a key, returning its value.
    ///
    /// The slot is tombstoned in place; no entries are shifted. Removing an
    /// absent or already-removed key is a no-op returning `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmaps::map::{ArrayMap, ValueOwnership};
    ///
    /// let mut map = ArrayMap::new(ValueOwnership::Owned);
    /// map.insert("k", 7)?;
    /// assert_eq!(map.remove("k"), Some(7));
    /// assert_eq!(map.remove("k"), None);
    /// # Ok::<(), ordmaps::map::MapError>(())
    /// ```
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.remove_hashed(hash_code(key), key)
    }

    /// Looks up a key, returning a reference to its value.
    ///
    /// A tombstoned slot reports absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmaps::map::{ArrayMap, ValueOwnership};
    ///
    /// let mut map = ArrayMap::new(ValueOwnership::Owned);
    /// map.insert("k", 7)?;
    /// assert_eq!(map.find("k"), Some(&7));
    /// assert_eq!(map.find("missing"), None);
    /// # Ok::<(), ordmaps::map::MapError>(())
    /// ```
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&V> {
        self.find_hashed(hash_code(key), key)
    }

    /// Removes every entry without shrinking capacity.
    ///
    /// Values still held by the map are released according to the
    /// [`ValueOwnership`] mode chosen at construction.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmaps::map::{ArrayMap, ValueOwnership};
    ///
    /// let mut map = ArrayMap::with_capacity(16, ValueOwnership::Owned)?;
    /// map.insert("k", 7)?;
    /// map.clear();
    /// assert_eq!(map.size(), 0);
    /// assert_eq!(map.capacity(), 16);
    /// # Ok::<(), ordmaps::map::MapError>(())
    /// ```
    pub fn clear(&mut self) {
        let ownership = self.ownership;

        for slot in self.slots.drain(..) {
            if let Slot::Occupied { value, .. } = slot {
                ownership.release(value);
            }
        }

        self.hashes.clear();
        self.garbage = false;
    }

    /// Moves the whole map out, leaving an empty map behind.
    ///
    /// The source is compacted first so the transferred storage is dense.
    /// The residual map keeps the same ownership mode and allocates lazily,
    /// like [`ArrayMap::new`]. No entries or values are copied.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmaps::map::{ArrayMap, ValueOwnership};
    ///
    /// let mut source = ArrayMap::new(ValueOwnership::Owned);
    /// source.insert("k", 7)?;
    ///
    /// let mut taken = source.take();
    /// assert_eq!(taken.find("k"), Some(&7));
    /// assert_eq!(source.size(), 0);
    /// # Ok::<(), ordmaps::map::MapError>(())
    /// ```
    #[must_use]
    pub fn take(&mut self) -> Self {
        if self.garbage {
            self.compact();
        }

        let replacement = Self::new(self.ownership);
        mem::replace(self, replacement)
    }

    /// Exchanges the entire contents of two maps.
    ///
    /// Both maps are compacted first. Only buffer ownership moves; no
    /// entries or values are copied.
    pub fn swap(&mut self, other: &mut Self) {
        if self.garbage {
            self.compact();
        }
        if other.garbage {
            other.compact();
        }

        mem::swap(self, other);
    }

    // -------------------------------------------------------------------------
    // Hash-parameterized core
    // -------------------------------------------------------------------------

    fn insert_hashed(&mut self, hash: u32, key: &str, value: V) -> Result<Option<V>, MapError> {
        match self.locate(key, hash) {
            Location::Key(index) => {
                self.hashes[index] = hash;
                let previous = mem::replace(
                    &mut self.slots[index],
                    Slot::Occupied {
                        key: Key::copied_from(key),
                        value,
                    },
                );

                match previous {
                    Slot::Occupied { value: old, .. } => Ok(Some(old)),
                    // Reviving a tombstoned key; nothing displaced.
                    Slot::Tombstone { .. } => Ok(None),
                }
            }
            Location::Gap(point) => {
                if point < self.slots.len() && self.slots[point].is_tombstone() {
                    // Reuse the neighbouring tombstone in place. Its stale
                    // hash is >= the new one and the run before the gap is
                    // <= it, so sortedness holds without shifting.
                    self.hashes[point] = hash;
                    self.slots[point] = Slot::Occupied {
                        key: Key::copied_from(key),
                        value,
                    };
                    return Ok(None);
                }

                if self.garbage && self.hashes.len() >= self.capacity {
                    // Full but with reclaimable slots: sweep, then redo the
                    // search against the compacted layout.
                    self.compact();
                    return self.insert_hashed(hash, key, value);
                }

                if self.hashes.len() == self.capacity {
                    self.grow()?;
                }

                self.hashes.insert(point, hash);
                self.slots.insert(
                    point,
                    Slot::Occupied {
                        key: Key::copied_from(key),
                        value,
                    },
                );
                Ok(None)
            }
        }
    }

    fn remove_hashed(&mut self, hash: u32, key: &str) -> Option<V> {
        let Location::Key(index) = self.locate(key, hash) else {
            return None;
        };

        let replaced = mem::replace(&mut self.slots[index], Slot::Tombstone { key: Key::empty() });

        match replaced {
            Slot::Occupied { key, value } => {
                self.slots[index] = Slot::Tombstone { key };
                self.garbage = true;
                Some(value)
            }
            Slot::Tombstone { key } => {
                self.slots[index] = Slot::Tombstone { key };
                None
            }
        }
    }

    fn find_hashed(&self, hash: u32, key: &str) -> Option<&V> {
        let Location::Key(index) = self.locate(key, hash) else {
            return None;
        };

        match &self.slots[index] {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Tombstone { .. } => None,
        }
    }

    /// Finds the slot whose key matches, scanning the whole equal-hash run
    /// in both directions, or the sorted position for a new entry.
    fn locate(&self, key: &str, hash: u32) -> Location {
        let index = match binary_search(&self.hashes, &hash) {
            SearchOutcome::NotFound(point) => return Location::Gap(point),
            SearchOutcome::Found(index) => index,
        };

        if self.slots[index].key().matches(key) {
            return Location::Key(index);
        }

        let mut end = index + 1;
        while end < self.hashes.len() && self.hashes[end] == hash {
            if self.slots[end].key().matches(key) {
                return Location::Key(end);
            }
            end += 1;
        }

        let mut back = index;
        while back > 0 && self.hashes[back - 1] == hash {
            back -= 1;
            if self.slots[back].key().matches(key) {
                return Location::Key(back);
            }
        }

        Location::Gap(end)
    }

    // -------------------------------------------------------------------------
    // Storage management
    // -------------------------------------------------------------------------

    /// Sweeps tombstones out in a single left-to-right pass, keeping live
    /// entries in order.
    fn compact(&mut self) {
        let mut live = 0;

        for index in 0..self.slots.len() {
            if self.slots[index].is_tombstone() {
                continue;
            }

            if index != live {
                self.hashes[live] = self.hashes[index];
                self.slots.swap(live, index);
            }
            live += 1;
        }

        // Everything past the live region is now a tombstone holding only
        // key storage, so plain truncation is enough.
        self.hashes.truncate(live);
        self.slots.truncate(live);
        self.garbage = false;
    }

    fn grow(&mut self) -> Result<(), MapError> {
        let target = if self.capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            self.capacity.saturating_mul(2)
        };
        self.reserve_total(target)
    }

    fn reserve_total(&mut self, target: usize) -> Result<(), MapError> {
        self.hashes
            .try_reserve_exact(target.saturating_sub(self.hashes.len()))?;
        self.slots
            .try_reserve_exact(target.saturating_sub(self.slots.len()))?;
        self.capacity = target;
        Ok(())
    }
}

impl<V> Default for ArrayMap<V> {
    fn default() -> Self {
        Self::new(ValueOwnership::Owned)
    }
}

impl<V> Drop for ArrayMap<V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<V: fmt::Debug> fmt::Debug for ArrayMap<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = formatter.debug_map();

        for slot in &self.slots {
            if let Slot::Occupied { key, value } = slot {
                builder.entry(key, value);
            }
        }

        builder.finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
