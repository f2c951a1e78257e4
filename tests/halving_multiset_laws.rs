//! Property-based tests for HalvingMultiset invariants.
//!
//! Verifies the halving-size, domination and insert invariants over random
//! operation sequences using proptest.

use halfset::multiset::HalvingMultiset;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Operation {
    Insert(i64),
    DeleteLargestHalf,
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        4 => (-50i64..50).prop_map(Operation::Insert),
        1 => Just(Operation::DeleteLargestHalf),
    ]
}

/// Removes one copy of each value in `retained` from `before`, returning
/// what is left: the values discarded by a delete.
fn discarded(before: &[i64], retained: &[i64]) -> Vec<i64> {
    let mut left = before.to_vec();
    for value in retained {
        let position = left
            .iter()
            .position(|candidate| candidate == value)
            .expect("retained value was not present before the delete");
        left.swap_remove(position);
    }
    left
}

proptest! {
    /// Size after delete is ceil(n/2) for n >= 2, unchanged otherwise
    #[test]
    fn prop_delete_halves_size(elements in prop::collection::vec(any::<i64>(), 0..300)) {
        let length = elements.len();
        let mut multiset: HalvingMultiset = elements.into_iter().collect();
        let report = multiset.delete_largest_half();

        if length <= 1 {
            prop_assert!(report.is_none());
            prop_assert_eq!(multiset.len(), length);
        } else {
            let report = report.unwrap();
            prop_assert_eq!(multiset.len(), length.div_ceil(2));
            prop_assert_eq!(report.retained, length.div_ceil(2));
            prop_assert_eq!(report.removed, length / 2);
        }
    }

    /// Every retained value is <= every discarded value, and the retained
    /// values are exactly the smallest ceil(n/2) as a multiset
    #[test]
    fn prop_retained_dominated_by_discarded(
        elements in prop::collection::vec(-20i64..20, 2..300)
    ) {
        let mut multiset: HalvingMultiset = elements.iter().copied().collect();
        let report = multiset.delete_largest_half().unwrap();
        let removed = discarded(&elements, multiset.snapshot());

        let retained_max = multiset.iter().max().copied().unwrap();
        prop_assert_eq!(retained_max, report.threshold);
        if let Some(&removed_min) = removed.iter().min() {
            prop_assert!(retained_max <= removed_min);
        }

        let mut expected = elements;
        expected.sort_unstable();
        expected.truncate(multiset.len());
        let mut actual = multiset.into_vec();
        actual.sort_unstable();
        prop_assert_eq!(actual, expected);
    }

    /// Insert grows the size by one and makes the value a member
    #[test]
    fn prop_insert_adds_member(
        elements in prop::collection::vec(any::<i64>(), 0..100),
        value in any::<i64>()
    ) {
        let mut multiset: HalvingMultiset = elements.into_iter().collect();
        let before = multiset.len();
        multiset.insert(value);

        prop_assert_eq!(multiset.len(), before + 1);
        prop_assert!(multiset.contains(&value));
    }

    /// Interleaved operations keep the contents equal to a sort-based model
    #[test]
    fn prop_matches_sorted_model(operations in prop::collection::vec(operation(), 0..200)) {
        let mut multiset = HalvingMultiset::new();
        let mut model: Vec<i64> = Vec::new();

        for operation in operations {
            match operation {
                Operation::Insert(value) => {
                    multiset.insert(value);
                    model.push(value);
                }
                Operation::DeleteLargestHalf => {
                    multiset.delete_largest_half();
                    if model.len() > 1 {
                        model.sort_unstable();
                        model.truncate(model.len().div_ceil(2));
                    }
                }
            }

            let mut actual = multiset.snapshot().to_vec();
            actual.sort_unstable();
            let mut expected = model.clone();
            expected.sort_unstable();
            prop_assert_eq!(actual, expected);
        }
    }

    /// Deleting again on a multiset of size 0 or 1 never changes it
    #[test]
    fn prop_small_multisets_are_fixed_points(elements in prop::collection::vec(any::<i64>(), 0..2)) {
        let mut multiset: HalvingMultiset = elements.into_iter().collect();
        let before = multiset.clone();
        multiset.delete_largest_half();
        multiset.delete_largest_half();
        prop_assert_eq!(multiset, before);
    }
}
