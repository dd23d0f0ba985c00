//! Unit tests for ArrayMap.

use ordmaps::map::{ArrayMap, ValueOwnership};
use rstest::rstest;
use std::rc::Rc;

fn owned_map<V>() -> ArrayMap<V> {
    ArrayMap::new(ValueOwnership::Owned)
}

// =============================================================================
// Basic Construction Tests
// =============================================================================

#[rstest]
fn test_new_creates_empty_map() {
    let mut map: ArrayMap<i32> = owned_map();
    assert_eq!(map.size(), 0);
    assert_eq!(map.capacity(), 0);
}

#[rstest]
fn test_default_is_owned_and_empty() {
    let mut map: ArrayMap<i32> = ArrayMap::default();
    assert_eq!(map.size(), 0);
    assert_eq!(map.ownership(), ValueOwnership::Owned);
}

#[rstest]
fn test_with_capacity_reserves_slots_up_front() {
    let map: ArrayMap<i32> = ArrayMap::with_capacity(32, ValueOwnership::Owned).unwrap();
    assert_eq!(map.capacity(), 32);
}

#[rstest]
fn test_with_capacity_zero_becomes_the_default() {
    let map: ArrayMap<i32> = ArrayMap::with_capacity(0, ValueOwnership::Owned).unwrap();
    assert_eq!(map.capacity(), 8);
}

#[rstest]
fn test_with_capacity_reports_impossible_reservations() {
    let result: Result<ArrayMap<u64>, _> = ArrayMap::with_capacity(usize::MAX, ValueOwnership::Owned);
    assert!(result.is_err());
}

// =============================================================================
// Insert / Find / Remove
// =============================================================================

#[rstest]
fn test_insert_then_find_yields_the_value() {
    let mut map = owned_map();
    map.insert("key", 42).unwrap();
    assert_eq!(map.find("key"), Some(&42));
}

#[rstest]
fn test_find_on_missing_key_is_absent() {
    let map: ArrayMap<i32> = owned_map();
    assert_eq!(map.find("missing"), None);
}

#[rstest]
fn test_duplicate_insert_is_an_update_not_an_error() {
    let mut map = owned_map();
    assert_eq!(map.insert("key", 1).unwrap(), None);
    assert_eq!(map.insert("key", 2).unwrap(), Some(1));
    assert_eq!(map.find("key"), Some(&2));
    assert_eq!(map.size(), 1);
}

#[rstest]
fn test_remove_makes_a_key_absent() {
    let mut map = owned_map();
    map.insert("key", 42).unwrap();
    assert_eq!(map.remove("key"), Some(42));
    assert_eq!(map.find("key"), None);
}

#[rstest]
fn test_removing_an_absent_key_is_a_no_op() {
    let mut map: ArrayMap<i32> = owned_map();
    assert_eq!(map.remove("missing"), None);

    map.insert("present", 1).unwrap();
    assert_eq!(map.remove("missing"), None);
    assert_eq!(map.size(), 1);
}

#[rstest]
fn test_double_remove_returns_none_the_second_time() {
    let mut map = owned_map();
    map.insert("key", 42).unwrap();
    assert_eq!(map.remove("key"), Some(42));
    assert_eq!(map.remove("key"), None);
}

#[rstest]
fn test_long_keys_round_trip_without_truncation() {
    let mut map = owned_map();
    let long_a = "a".repeat(200);
    let long_b = format!("{}b", "a".repeat(200));

    map.insert(&long_a, 1).unwrap();
    map.insert(&long_b, 2).unwrap();

    assert_eq!(map.find(&long_a), Some(&1));
    assert_eq!(map.find(&long_b), Some(&2));
}

// =============================================================================
// Size and Clear
// =============================================================================

#[rstest]
fn test_size_is_inserts_minus_removes() {
    let mut map = owned_map();
    for index in 0..10 {
        map.insert(&format!("key-{index}"), index).unwrap();
    }
    for index in 0..4 {
        assert!(map.remove(&format!("key-{index}")).is_some());
    }

    assert_eq!(map.size(), 6);
}

#[rstest]
fn test_clear_empties_without_shrinking() {
    let mut map = ArrayMap::with_capacity(16, ValueOwnership::Owned).unwrap();
    for index in 0..10 {
        map.insert(&format!("key-{index}"), index).unwrap();
    }

    map.clear();

    assert_eq!(map.size(), 0);
    assert_eq!(map.capacity(), 16);
    assert_eq!(map.find("key-3"), None);

    // The map is fully usable after clearing.
    map.insert("fresh", 1).unwrap();
    assert_eq!(map.find("fresh"), Some(&1));
}

// =============================================================================
// Scenario A: insert a/b/c, remove b
// =============================================================================

#[rstest]
fn test_scenario_insert_three_remove_middle() {
    let mut map = owned_map();
    map.insert("a", 1).unwrap();
    map.insert("b", 2).unwrap();
    map.insert("c", 3).unwrap();

    assert_eq!(map.find("b"), Some(&2));
    map.remove("b");
    assert_eq!(map.find("b"), None);
    assert_eq!(map.size(), 2);
    assert_eq!(map.find("a"), Some(&1));
    assert_eq!(map.find("c"), Some(&3));
}

// =============================================================================
// Scenario B: growth past the initial capacity
// =============================================================================

#[rstest]
fn test_scenario_capacity_doubles_past_eight_entries() {
    let mut map = ArrayMap::with_capacity(8, ValueOwnership::Owned).unwrap();
    for index in 0..9 {
        map.insert(&format!("key-{index}"), index).unwrap();
    }

    assert!(map.capacity() >= 16);
    for index in 0..9 {
        assert_eq!(map.find(&format!("key-{index}")), Some(&index));
    }
}

// =============================================================================
// Move and Swap
// =============================================================================

#[rstest]
fn test_take_transfers_the_contents() {
    let mut source = owned_map();
    source.insert("a", 1).unwrap();
    source.insert("b", 2).unwrap();
    source.remove("a");

    let mut taken = source.take();

    assert_eq!(taken.size(), 1);
    assert_eq!(taken.find("b"), Some(&2));
    assert_eq!(source.size(), 0);
    assert_eq!(source.ownership(), ValueOwnership::Owned);

    // The residual map accepts new entries.
    source.insert("c", 3).unwrap();
    assert_eq!(source.find("c"), Some(&3));
    assert_eq!(taken.find("c"), None);
}

#[rstest]
fn test_swap_exchanges_the_contents() {
    let mut left = owned_map();
    left.insert("left", 1).unwrap();

    let mut right = owned_map();
    right.insert("right-1", 10).unwrap();
    right.insert("right-2", 20).unwrap();

    left.swap(&mut right);

    assert_eq!(left.size(), 2);
    assert_eq!(left.find("right-1"), Some(&10));
    assert_eq!(right.size(), 1);
    assert_eq!(right.find("left"), Some(&1));
}

// =============================================================================
// Value Ownership
// =============================================================================

#[rstest]
fn test_owned_map_drops_values_on_clear() {
    let value = Rc::new(1);
    let mut map = ArrayMap::new(ValueOwnership::Owned);
    map.insert("k", Rc::clone(&value)).unwrap();

    map.clear();
    assert_eq!(Rc::strong_count(&value), 1);
}

#[rstest]
fn test_owned_map_drops_values_on_drop() {
    let value = Rc::new(1);
    {
        let mut map = ArrayMap::new(ValueOwnership::Owned);
        map.insert("k", Rc::clone(&value)).unwrap();
    }
    assert_eq!(Rc::strong_count(&value), 1);
}

#[rstest]
fn test_borrowed_map_never_drops_values() {
    let value = Rc::new(1);
    {
        let mut map = ArrayMap::new(ValueOwnership::Borrowed);
        map.insert("k", Rc::clone(&value)).unwrap();
        map.clear();
        // The clone was forgotten, not dropped.
        assert_eq!(Rc::strong_count(&value), 2);
    }
    assert_eq!(Rc::strong_count(&value), 2);
}

#[rstest]
fn test_displaced_values_are_returned_in_both_modes() {
    let mut borrowed = ArrayMap::new(ValueOwnership::Borrowed);
    borrowed.insert("k", 1).unwrap();
    assert_eq!(borrowed.insert("k", 2).unwrap(), Some(1));
    assert_eq!(borrowed.remove("k"), Some(2));
}
