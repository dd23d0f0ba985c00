//! Ordered map backed by an AVL-balanced binary search tree.
//!
//! This module provides [`AvlTreeMap`], a mutable ordered map over arbitrary
//! keys under a caller-supplied total order. The tree maintains the AVL
//! invariant (the heights of the two subtrees of every node differ by at
//! most one), so lookups, inserts, and removals are all O(log n).
//!
//! # Comparators
//!
//! Ordering is supplied through the [`Comparator`] trait as a generic type
//! parameter, so the comparison is resolved at compile time instead of
//! through an indirect call. [`NaturalOrder`] (the default) delegates to the
//! key's `Ord` implementation, and any `Fn(&K, &K) -> Ordering` closure is a
//! comparator too.
//!
//! The comparator must be a total order. Violating transitivity or
//! antisymmetry silently corrupts the tree (entries become unreachable);
//! it never causes memory unsafety. This is a precondition, not a checked
//! error.
//!
//! # Examples
//!
//! ```rust
//! use ordmaps::map::AvlTreeMap;
//!
//! let mut map = AvlTreeMap::new();
//! map.insert(3, "three");
//! map.insert(1, "one");
//! map.insert(2, "two");
//!
//! assert_eq!(map.get(&2), Some(&"two"));
//! assert_eq!(map.lower_bound(&2), Some((&2, &"two")));
//! assert_eq!(map.upper_bound(&2), Some((&3, &"three")));
//!
//! let mut keys = Vec::new();
//! map.for_each_in_order(|key, _| keys.push(*key));
//! assert_eq!(keys, vec![1, 2, 3]);
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::mem;

use crate::map::ValueOwnership;

// =============================================================================
// Comparator
// =============================================================================

/// A total order over keys of type `K`.
///
/// Supplied at construction as a generic type parameter, so `compare` calls
/// compile down to direct calls (and, for [`NaturalOrder`], usually inline
/// away entirely).
///
/// # Contract
///
/// `compare` must describe a total order: antisymmetric, transitive, and
/// consistent across calls. The tree does not check this; a lawless
/// comparator silently corrupts lookup results.
///
/// # Examples
///
/// Any ordering closure is a comparator:
///
/// ```rust
/// use ordmaps::map::AvlTreeMap;
///
/// let mut map = AvlTreeMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// map.insert(1, "one");
/// map.insert(2, "two");
///
/// // Reverse order: 2 comes first.
/// assert_eq!(map.first(), Some((&2, &"two")));
/// ```
pub trait Comparator<K> {
    /// Compares two keys, returning their ordering.
    fn compare(&self, left: &K, right: &K) -> Ordering;
}

/// The natural order of keys implementing [`Ord`]. This is the default
/// comparator of [`AvlTreeMap`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct NaturalOrder;

impl<K: Ord> Comparator<K> for NaturalOrder {
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        left.cmp(right)
    }
}

impl<K, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &K, right: &K) -> Ordering {
        self(left, right)
    }
}

// =============================================================================
// Nodes
// =============================================================================

type Link<K, V> = Option<Box<Node<K, V>>>;

/// A tree node. Children are exclusively owned by their parent, so the
/// whole tree forms an ownership tree with no sharing.
struct Node<K, V> {
    key: K,
    value: V,
    /// 1 for a leaf; an absent child counts as height 0.
    height: i32,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            height: 1,
            left: None,
            right: None,
        })
    }

    fn update_height(&mut self) {
        self.height = 1 + link_height(&self.left).max(link_height(&self.right));
    }

    /// `height(left) - height(right)`; +2 means left-heavy beyond the AVL
    /// bound, -2 right-heavy.
    fn balance_factor(&self) -> i32 {
        link_height(&self.left) - link_height(&self.right)
    }
}

fn link_height<K, V>(link: &Link<K, V>) -> i32 {
    link.as_deref().map_or(0, |node| node.height)
}

// =============================================================================
// Rotations
// =============================================================================

fn rotate_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };

    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

fn rotate_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };

    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

/// Restores the AVL invariant at `node` after one of its subtrees changed
/// height by at most one.
///
/// The four standard cases, driven by the node's own balance factor and the
/// heavier child's: a same-side heavy child takes a single rotation, an
/// opposite-side heavy child takes a double rotation. One rebalancing step
/// per node is always enough.
fn rebalance<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    node.update_height();
    let balance = node.balance_factor();

    if balance > 1 {
        if let Some(left) = node.left.take() {
            let left = if left.balance_factor() < 0 {
                rotate_left(left)
            } else {
                left
            };
            node.left = Some(left);
            return rotate_right(node);
        }
    } else if balance < -1 {
        if let Some(right) = node.right.take() {
            let right = if right.balance_factor() > 0 {
                rotate_right(right)
            } else {
                right
            };
            node.right = Some(right);
            return rotate_left(node);
        }
    }

    node
}

// =============================================================================
// Recursive insert / remove
// =============================================================================

fn insert_into<K, V, C: Comparator<K>>(
    link: Link<K, V>,
    key: K,
    value: V,
    comparator: &C,
    displaced: &mut Option<V>,
) -> Box<Node<K, V>> {
    let Some(mut node) = link else {
        return Node::new(key, value);
    };

    match comparator.compare(&key, &node.key) {
        Ordering::Equal => {
            // Duplicate key: replace the value in place, no structural
            // change, keep the stored key.
            *displaced = Some(mem::replace(&mut node.value, value));
            node
        }
        Ordering::Less => {
            node.left = Some(insert_into(node.left.take(), key, value, comparator, displaced));
            rebalance(node)
        }
        Ordering::Greater => {
            node.right = Some(insert_into(node.right.take(), key, value, comparator, displaced));
            rebalance(node)
        }
    }
}

fn remove_from<K, V, C: Comparator<K>>(
    link: Link<K, V>,
    key: &K,
    comparator: &C,
    removed: &mut Option<(K, V)>,
) -> Link<K, V> {
    let mut node = link?;

    match comparator.compare(key, &node.key) {
        Ordering::Less => {
            node.left = remove_from(node.left.take(), key, comparator, removed);
        }
        Ordering::Greater => {
            node.right = remove_from(node.right.take(), key, comparator, removed);
        }
        Ordering::Equal => {
            if node.left.is_none() || node.right.is_none() {
                // At most one child: splice the node out directly.
                let unboxed = *node;
                *removed = Some((unboxed.key, unboxed.value));
                return unboxed.left.or(unboxed.right);
            }

            // Two children: pull the in-order successor's payload up into
            // this node and delete it from its old position, rebalancing
            // the whole descent path on the way back.
            if let Some(right) = node.right.take() {
                let (rest, successor_key, successor_value) = remove_leftmost(right);
                node.right = rest;
                *removed = Some((
                    mem::replace(&mut node.key, successor_key),
                    mem::replace(&mut node.value, successor_value),
                ));
            }
        }
    }

    Some(rebalance(node))
}

/// Detaches the leftmost node of a subtree, returning the remaining subtree
/// (rebalanced bottom-up) together with the detached payload.
fn remove_leftmost<K, V>(mut node: Box<Node<K, V>>) -> (Link<K, V>, K, V) {
    match node.left.take() {
        None => {
            let unboxed = *node;
            (unboxed.right, unboxed.key, unboxed.value)
        }
        Some(left) => {
            let (rest, key, value) = remove_leftmost(left);
            node.left = rest;
            (Some(rebalance(node)), key, value)
        }
    }
}

// =============================================================================
// AvlTreeMap
// =============================================================================

/// An ordered map backed by an AVL-balanced binary search tree.
///
/// Keys are ordered by a [`Comparator`] chosen at construction
/// ([`NaturalOrder`] by default). Every mutation keeps the tree
/// height-balanced, so the height is bounded by roughly `1.44 * log2(n)`
/// and all point operations are O(log n).
///
/// # Time Complexity
///
/// | Operation                    | Complexity |
/// |------------------------------|------------|
/// | `insert` / `remove` / `get`  | O(log n)   |
/// | `lower_bound` / `upper_bound`| O(log n)   |
/// | `first` / `last`             | O(log n)   |
/// | `len` / `is_empty`           | O(1)       |
/// | traversals / `clear`         | O(n)       |
/// | `take` / `swap`              | O(1)       |
///
/// # Examples
///
/// ```rust
/// use ordmaps::map::AvlTreeMap;
///
/// let mut map = AvlTreeMap::new();
/// map.insert("b", 2);
/// map.insert("a", 1);
///
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get(&"a"), Some(&1));
/// assert_eq!(map.remove(&"a"), Some(1));
/// assert!(!map.contains_key(&"a"));
/// ```
pub struct AvlTreeMap<K, V, C = NaturalOrder> {
    root: Link<K, V>,
    length: usize,
    comparator: C,
    ownership: ValueOwnership,
}

impl<K, V> AvlTreeMap<K, V, NaturalOrder> {
    /// Creates a new empty map ordered by the keys' `Ord` implementation,
    /// with owned values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmaps::map::AvlTreeMap;
    ///
    /// let map: AvlTreeMap<i32, String> = AvlTreeMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator_and_ownership(NaturalOrder, ValueOwnership::Owned)
    }

    /// Creates a new empty naturally-ordered map with the given value
    /// ownership mode.
    #[inline]
    #[must_use]
    pub const fn with_ownership(ownership: ValueOwnership) -> Self {
        Self::with_comparator_and_ownership(NaturalOrder, ownership)
    }
}

impl<K, V, C> AvlTreeMap<K, V, C> {
    /// Creates a new empty map ordered by `comparator`, with owned values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmaps::map::AvlTreeMap;
    ///
    /// let by_length = |a: &String, b: &String| {
    ///     a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    /// };
    /// let mut map = AvlTreeMap::with_comparator(by_length);
    /// map.insert("aaa".to_string(), 3);
    /// map.insert("a".to_string(), 1);
    ///
    /// assert_eq!(map.first(), Some((&"a".to_string(), &1)));
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self::with_comparator_and_ownership(comparator, ValueOwnership::Owned)
    }

    /// Creates a new empty map with both the comparator and the value
    /// ownership mode chosen explicitly.
    #[inline]
    #[must_use]
    pub const fn with_comparator_and_ownership(comparator: C, ownership: ValueOwnership) -> Self {
        Self {
            root: None,
            length: 0,
            comparator,
            ownership,
        }
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the height of the tree: 0 when empty, 1 for a single entry.
    #[must_use]
    pub fn height(&self) -> usize {
        usize::try_from(link_height(&self.root)).unwrap_or(0)
    }

    /// Returns the ownership mode chosen at construction.
    #[inline]
    #[must_use]
    pub const fn ownership(&self) -> ValueOwnership {
        self.ownership
    }

    /// Returns the entry with the smallest key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmaps::map::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert(2, "two");
    /// map.insert(1, "one");
    /// assert_eq!(map.first(), Some((&1, &"one")));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn last(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    /// Visits every entry in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmaps::map::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert(2, "two");
    /// map.insert(1, "one");
    /// map.insert(3, "three");
    ///
    /// let mut visited = Vec::new();
    /// map.for_each_in_order(|key, value| visited.push((*key, *value)));
    /// assert_eq!(visited, vec![(1, "one"), (2, "two"), (3, "three")]);
    /// ```
    pub fn for_each_in_order<F: FnMut(&K, &V)>(&self, mut visitor: F) {
        fn walk<K, V, F: FnMut(&K, &V)>(link: &Link<K, V>, visitor: &mut F) {
            if let Some(node) = link {
                walk(&node.left, visitor);
                visitor(&node.key, &node.value);
                walk(&node.right, visitor);
            }
        }

        walk(&self.root, &mut visitor);
    }

    /// Visits every entry in pre-order (each node before its subtrees), so
    /// the root comes first.
    pub fn for_each_pre_order<F: FnMut(&K, &V)>(&self, mut visitor: F) {
        fn walk<K, V, F: FnMut(&K, &V)>(link: &Link<K, V>, visitor: &mut F) {
            if let Some(node) = link {
                visitor(&node.key, &node.value);
                walk(&node.left, visitor);
                walk(&node.right, visitor);
            }
        }

        walk(&self.root, &mut visitor);
    }

    /// Visits every entry in post-order (each node after its subtrees), so
    /// the root comes last.
    pub fn for_each_post_order<F: FnMut(&K, &V)>(&self, mut visitor: F) {
        fn walk<K, V, F: FnMut(&K, &V)>(link: &Link<K, V>, visitor: &mut F) {
            if let Some(node) = link {
                walk(&node.left, visitor);
                walk(&node.right, visitor);
                visitor(&node.key, &node.value);
            }
        }

        walk(&self.root, &mut visitor);
    }

    /// Removes every entry.
    ///
    /// Values still held by the map are released according to the
    /// [`ValueOwnership`] mode. The walk uses an explicit stack rather
    /// than recursion, so very large trees cannot exhaust the call stack.
    pub fn clear(&mut self) {
        let ownership = self.ownership;
        let mut pending = Vec::new();
        pending.extend(self.root.take());

        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
            let unboxed = *node;
            ownership.release(unboxed.value);
        }

        self.length = 0;
    }

    /// Exchanges the entire contents of two maps, comparators included.
    ///
    /// O(1); no entries or values are copied.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }
}

impl<K, V, C: Clone> AvlTreeMap<K, V, C> {
    /// Moves the whole map out, leaving an empty map behind.
    ///
    /// The residual map keeps the same comparator and ownership mode.
    /// O(1); no entries or values are copied.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmaps::map::AvlTreeMap;
    ///
    /// let mut source = AvlTreeMap::new();
    /// source.insert(1, "one");
    ///
    /// let taken = source.take();
    /// assert_eq!(taken.len(), 1);
    /// assert!(source.is_empty());
    /// ```
    #[must_use]
    pub fn take(&mut self) -> Self {
        let replacement = Self {
            root: None,
            length: 0,
            comparator: self.comparator.clone(),
            ownership: self.ownership,
        };
        mem::replace(self, replacement)
    }
}

impl<K, V, C: Comparator<K>> AvlTreeMap<K, V, C> {
    /// Inserts a key/value pair.
    ///
    /// A duplicate key replaces the value in place without any structural
    /// change, and the old value is returned to the caller. A fresh key is placed
    /// by recursive descent, and on the way back up each ancestor's height
    /// is recomputed; an ancestor whose balance factor reaches ±2 is fixed
    /// with a single or double rotation. One rebalancing step per ancestor
    /// restores the AVL invariant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmaps::map::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// assert_eq!(map.insert(1, "one"), None);
    /// assert_eq!(map.insert(1, "ONE"), Some("one"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut displaced = None;
        let root = self.root.take();
        self.root = Some(insert_into(
            root,
            key,
            value,
            &self.comparator,
            &mut displaced,
        ));

        if displaced.is_none() {
            self.length += 1;
        }
        displaced
    }

    /// Removes a key, returning its value.
    ///
    /// A node with at most one child is spliced out directly. A node with
    /// two children takes its in-order successor's payload and the
    /// successor node is deleted instead; every ancestor on the descent
    /// path is then rebalanced bottom-up. Removing an absent key is a
    /// no-op returning `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmaps::map::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert(1, "one");
    /// assert_eq!(map.remove(&1), Some("one"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let mut removed = None;
        let root = self.root.take();
        self.root = remove_from(root, key, &self.comparator, &mut removed);

        removed.map(|(_, value)| {
            self.length -= 1;
            value
        })
    }

    /// Looks up a key, returning a reference to its value.
    ///
    /// Iterative descent; read-only, never rebalances.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let mut current = self.root.as_deref();

        while let Some(node) = current {
            match self.comparator.compare(key, &node.key) {
                Ordering::Equal => return Some(&node.value),
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
            }
        }

        None
    }

    /// Returns `true` if the map contains the key.
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns the entry with the smallest key that is greater than or
    /// equal to `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmaps::map::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert(10, "ten");
    /// map.insert(20, "twenty");
    ///
    /// assert_eq!(map.lower_bound(&10), Some((&10, &"ten")));
    /// assert_eq!(map.lower_bound(&15), Some((&20, &"twenty")));
    /// assert_eq!(map.lower_bound(&21), None);
    /// ```
    #[must_use]
    pub fn lower_bound(&self, key: &K) -> Option<(&K, &V)> {
        let mut current = self.root.as_deref();
        let mut candidate = None;

        while let Some(node) = current {
            if self.comparator.compare(key, &node.key) == Ordering::Greater {
                current = node.right.as_deref();
            } else {
                candidate = Some((&node.key, &node.value));
                current = node.left.as_deref();
            }
        }

        candidate
    }

    /// Returns the entry with the smallest key that is strictly greater
    /// than `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordmaps::map::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert(10, "ten");
    /// map.insert(20, "twenty");
    ///
    /// assert_eq!(map.upper_bound(&10), Some((&20, &"twenty")));
    /// assert_eq!(map.upper_bound(&20), None);
    /// ```
    #[must_use]
    pub fn upper_bound(&self, key: &K) -> Option<(&K, &V)> {
        let mut current = self.root.as_deref();
        let mut candidate = None;

        while let Some(node) = current {
            if self.comparator.compare(key, &node.key) == Ordering::Less {
                candidate = Some((&node.key, &node.value));
                current = node.left.as_deref();
            } else {
                current = node.right.as_deref();
            }
        }

        candidate
    }
}

impl<K, V, C: Default> Default for AvlTreeMap<K, V, C> {
    fn default() -> Self {
        Self::with_comparator_and_ownership(C::default(), ValueOwnership::Owned)
    }
}

impl<K, V, C> Drop for AvlTreeMap<K, V, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTreeMap<K, V, NaturalOrder> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for AvlTreeMap<K, V, C> {
    /// Inserts every pair from the iterator. A displaced value has no
    /// caller to return to here, so it is released according to the
    /// [`ValueOwnership`] mode instead of being dropped unconditionally.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            if let Some(displaced) = self.insert(key, value) {
                self.ownership.release(displaced);
            }
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for AvlTreeMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = formatter.debug_map();
        self.for_each_in_order(|key, value| {
            builder.entry(key, value);
        });
        builder.finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
