//! Multiset supporting insert and delete-largest-half.
//!
//! This module provides [`HalvingMultiset`], an unordered multiset whose only
//! removal operation discards the larger half of its values.
//!
//! # Overview
//!
//! Values are kept in an unsorted `Vec`, so insertion is a plain append.
//! [`HalvingMultiset::delete_largest_half`] finds the threshold separating
//! the kept half from the discarded half with
//! [`select_kth`](crate::selection::select_kth), then filters the storage
//! around it in one pass. No sorted order is ever built.
//!
//! # Time Complexity
//!
//! | Operation             | Worst case | Amortized |
//! |-----------------------|------------|-----------|
//! | `insert`              | O(1)*      | O(1)      |
//! | `delete_largest_half` | O(n)       | O(1)      |
//! | `len`                 | O(1)       | O(1)      |
//! | `contains`            | O(n)       | O(n)      |
//! | `snapshot`            | O(1)       | O(1)      |
//!
//! \* amortized over `Vec` growth.
//!
//! Every `delete_largest_half` costs O(n) and leaves at most `ceil(n/2)`
//! values, so a run of deletes costs `n + n/2 + n/4 + ... = O(n)` and any
//! sequence of m operations costs O(m) in total.
//!
//! # Tie-Breaking
//!
//! When several copies of the threshold value straddle the cut, the copies
//! that come first in storage order are kept. Retained values keep their
//! relative storage order.
//!
//! # Examples
//!
//! ```rust
//! use halfset::multiset::HalvingMultiset;
//!
//! let mut multiset = HalvingMultiset::new();
//! multiset.insert(10);
//! multiset.insert(3);
//! multiset.insert(7);
//!
//! let report = multiset.delete_largest_half().unwrap();
//! assert_eq!(report.threshold, 7);
//! assert_eq!(multiset.snapshot(), &[3, 7]);
//!
//! multiset.insert(5);
//! multiset.delete_largest_half();
//! assert_eq!(multiset.snapshot(), &[3, 5]);
//!
//! multiset.delete_largest_half();
//! assert_eq!(multiset.snapshot(), &[3]);
//!
//! // Collections of size 0 or 1 are left unchanged.
//! assert!(multiset.delete_largest_half().is_none());
//! assert_eq!(multiset.len(), 1);
//! ```

use std::cmp::Ordering;

use crate::selection::select_kth;

/// Outcome of one [`HalvingMultiset::delete_largest_half`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HalvingReport<T> {
    /// The `ceil(n/2)`-th smallest value. Every retained value is `<=` it
    /// and every removed value is `>=` it.
    pub threshold: T,
    /// Number of values kept.
    pub retained: usize,
    /// Number of values discarded.
    pub removed: usize,
}

/// An unordered multiset with insert and delete-largest-half.
///
/// # Type Parameters
///
/// * `T` - The element type. Defaults to `i64`.
///
/// # Examples
///
/// ```rust
/// use halfset::multiset::HalvingMultiset;
///
/// let mut multiset: HalvingMultiset = (1..=9).collect();
/// multiset.delete_largest_half();
///
/// assert_eq!(multiset.len(), 5);
/// assert!(multiset.iter().all(|&value| value <= 5));
/// ```
#[derive(Clone)]
pub struct HalvingMultiset<T = i64> {
    elements: Vec<T>,
}

impl<T> HalvingMultiset<T> {
    /// Creates a new empty multiset.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Creates an empty multiset with room for `capacity` values.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of values, counting duplicates.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the multiset holds no values.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Adds `value`. The size grows by exactly one.
    #[inline]
    pub fn insert(&mut self, value: T) {
        self.elements.push(value);
    }

    /// Returns the current contents in container order.
    ///
    /// The order is not meaningful beyond being stable between mutations.
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> &[T] {
        &self.elements
    }

    /// Returns an iterator over the values in container order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// Consumes the multiset, returning its storage.
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }

    /// Returns the values sorted, borrowed from the storage.
    fn sorted_refs(&self) -> Vec<&T>
    where
        T: Ord,
    {
        let mut sorted: Vec<&T> = self.elements.iter().collect();
        sorted.sort_unstable();
        sorted
    }

    /// Returns `true` if at least one copy of `value` is present.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.elements.contains(value)
    }
}

impl<T: Ord + Clone> HalvingMultiset<T> {
    /// Removes the `floor(n/2)` largest values, keeping `ceil(n/2)`.
    ///
    /// Returns `None` without touching the multiset when it holds fewer than
    /// two values. Otherwise returns the threshold and the retained and
    /// removed counts.
    ///
    /// Runs in O(n) worst-case time and allocates O(n) scratch space that is
    /// released before returning.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use halfset::multiset::{HalvingMultiset, HalvingReport};
    ///
    /// let mut multiset: HalvingMultiset = vec![4, 4, 4, 1].into_iter().collect();
    /// let report = multiset.delete_largest_half();
    ///
    /// assert_eq!(
    ///     report,
    ///     Some(HalvingReport { threshold: 4, retained: 2, removed: 2 })
    /// );
    /// assert_eq!(multiset.snapshot(), &[4, 1]);
    /// ```
    pub fn delete_largest_half(&mut self) -> Option<HalvingReport<T>> {
        let length = self.elements.len();
        if length <= 1 {
            return None;
        }

        let keep = length.div_ceil(2);
        let threshold = select_kth(self.elements.clone(), keep - 1);

        let mut less = 0;
        let mut equal = 0;
        for value in &self.elements {
            match value.cmp(&threshold) {
                Ordering::Less => less += 1,
                Ordering::Equal => equal += 1,
                Ordering::Greater => {}
            }
        }

        let need = equal_copies_to_keep(keep, less, equal);
        let mut remaining = need;
        self.elements.retain(|value| match value.cmp(&threshold) {
            Ordering::Less => true,
            Ordering::Equal if remaining > 0 => {
                remaining -= 1;
                true
            }
            _ => false,
        });

        let retained = self.elements.len();
        tracing::debug!(
            before = length,
            retained,
            below_threshold = less,
            at_threshold = need,
            "deleted largest half"
        );

        Some(HalvingReport {
            threshold,
            retained,
            removed: length - retained,
        })
    }
}

/// Number of copies of the threshold needed to bring the retained count up
/// to `keep`, clamped to `[0, equal]`.
///
/// With a correct threshold `less < keep <= less + equal` always holds, so the
/// clamp never changes the result.
fn equal_copies_to_keep(keep: usize, less: usize, equal: usize) -> usize {
    let need = keep.saturating_sub(less);
    let consistent = less <= keep && need <= equal;
    if !consistent {
        tracing::error!(
            keep,
            less,
            equal,
            "threshold does not split the multiset, clamping retained count"
        );
    }
    debug_assert!(
        consistent,
        "threshold does not split the multiset: keep {keep}, less {less}, equal {equal}"
    );
    need.min(equal)
}

impl<T> Default for HalvingMultiset<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Multiset equality: same values with the same multiplicities, regardless
/// of storage order.
///
/// ```rust
/// use halfset::multiset::HalvingMultiset;
///
/// let left: HalvingMultiset = vec![1, 2, 2].into_iter().collect();
/// let right: HalvingMultiset = vec![2, 1, 2].into_iter().collect();
/// assert_eq!(left, right);
/// ```
impl<T: Ord> PartialEq for HalvingMultiset<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.sorted_refs() == other.sorted_refs()
    }
}

impl<T: Ord> Eq for HalvingMultiset<T> {}

impl<T: Ord + std::hash::Hash> std::hash::Hash for HalvingMultiset<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.sorted_refs().hash(state);
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for HalvingMultiset<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_set().entries(self.elements.iter()).finish()
    }
}

impl<T> FromIterator<T> for HalvingMultiset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for HalvingMultiset<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

impl<T> IntoIterator for HalvingMultiset<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a HalvingMultiset<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for HalvingMultiset<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.elements, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for HalvingMultiset<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <Vec<T> as serde::Deserialize>::deserialize(deserializer).map(|elements| Self { elements })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_new_creates_empty() {
        let multiset: HalvingMultiset = HalvingMultiset::new();
        assert!(multiset.is_empty());
        assert_eq!(multiset.len(), 0);
        assert_eq!(multiset.snapshot(), &[] as &[i64]);
    }

    #[rstest]
    fn test_insert_appends_in_order() {
        let mut multiset = HalvingMultiset::with_capacity(3);
        multiset.insert(10);
        multiset.insert(3);
        multiset.insert(7);
        assert_eq!(multiset.snapshot(), &[10, 3, 7]);
    }

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec![5], vec![5])]
    fn test_delete_on_tiny_multiset_is_noop(#[case] initial: Vec<i64>, #[case] expected: Vec<i64>) {
        let mut multiset: HalvingMultiset = initial.into_iter().collect();
        assert_eq!(multiset.delete_largest_half(), None);
        assert_eq!(multiset.snapshot(), expected.as_slice());
    }

    #[rstest]
    #[case(vec![2, 1], vec![1], 1)]
    #[case(vec![10, 3, 7], vec![3, 7], 7)]
    #[case(vec![6, 5, 4, 3, 2, 1], vec![3, 2, 1], 3)]
    #[case(vec![1, 9, 1, 9, 1], vec![1, 1, 1], 1)]
    fn test_delete_keeps_smallest_half_in_storage_order(
        #[case] initial: Vec<i64>,
        #[case] expected: Vec<i64>,
        #[case] threshold: i64,
    ) {
        let mut multiset: HalvingMultiset = initial.iter().copied().collect();
        let report = multiset.delete_largest_half().unwrap();

        assert_eq!(multiset.snapshot(), expected.as_slice());
        assert_eq!(report.threshold, threshold);
        assert_eq!(report.retained, expected.len());
        assert_eq!(report.removed, initial.len() - expected.len());
    }

    #[rstest]
    fn test_tied_threshold_keeps_earliest_copies() {
        let mut multiset: HalvingMultiset = vec![7, 2, 7, 9, 7, 7].into_iter().collect();
        let report = multiset.delete_largest_half().unwrap();

        // keep 3: the 2 plus the first two 7s
        assert_eq!(report.threshold, 7);
        assert_eq!(multiset.snapshot(), &[7, 2, 7]);
    }

    #[rstest]
    fn test_all_equal_values() {
        let mut multiset: HalvingMultiset = std::iter::repeat_n(4, 9).collect();
        multiset.delete_largest_half();
        assert_eq!(multiset.snapshot(), &[4; 5]);
    }

    #[rstest]
    #[case(3, 0, 3, 3)]
    #[case(3, 1, 5, 2)]
    #[case(4, 4, 1, 0)]
    fn test_equal_copies_to_keep(
        #[case] keep: usize,
        #[case] less: usize,
        #[case] equal: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(equal_copies_to_keep(keep, less, equal), expected);
    }

    #[cfg(not(debug_assertions))]
    #[rstest]
    fn test_equal_copies_to_keep_clamps_in_release() {
        assert_eq!(equal_copies_to_keep(2, 5, 3), 0);
        assert_eq!(equal_copies_to_keep(9, 1, 3), 3);
    }

    #[cfg(debug_assertions)]
    #[rstest]
    #[should_panic(expected = "threshold does not split the multiset")]
    fn test_equal_copies_to_keep_asserts_in_debug() {
        let _ = equal_copies_to_keep(9, 1, 3);
    }

    #[rstest]
    fn test_equality_ignores_storage_order() {
        let left: HalvingMultiset = vec![1, 2, 2].into_iter().collect();
        let right: HalvingMultiset = vec![2, 1, 2].into_iter().collect();
        assert_eq!(left, right);
    }

    #[rstest]
    #[case(vec![1, 2, 2], vec![1, 1, 2])]
    #[case(vec![1, 2], vec![1, 2, 2])]
    #[case(vec![], vec![0])]
    fn test_equality_respects_multiplicity(#[case] left: Vec<i64>, #[case] right: Vec<i64>) {
        let left: HalvingMultiset = left.into_iter().collect();
        let right: HalvingMultiset = right.into_iter().collect();
        assert_ne!(left, right);
    }

    #[rstest]
    fn test_halving_same_contents_in_different_order_gives_equal_results() {
        let mut left: HalvingMultiset = vec![9, 1, 2, 2].into_iter().collect();
        let mut right: HalvingMultiset = vec![2, 2, 9, 1].into_iter().collect();
        left.delete_largest_half();
        right.delete_largest_half();

        assert_eq!(left.snapshot(), &[1, 2]);
        assert_eq!(right.snapshot(), &[2, 1]);
        assert_eq!(left, right);
    }

    #[rstest]
    fn test_hash_ignores_storage_order() {
        use std::collections::HashSet;

        let mut seen = HashSet::new();
        seen.insert(vec![3, 1, 2].into_iter().collect::<HalvingMultiset>());
        assert!(seen.contains(&vec![2, 3, 1].into_iter().collect::<HalvingMultiset>()));
        assert!(!seen.contains(&vec![2, 3, 3].into_iter().collect::<HalvingMultiset>()));
    }

    #[rstest]
    fn test_debug_format() {
        let multiset: HalvingMultiset = vec![2, 1].into_iter().collect();
        assert_eq!(format!("{multiset:?}"), "{2, 1}");
    }

    #[rstest]
    fn test_extend_and_into_iter() {
        let mut multiset = HalvingMultiset::new();
        multiset.extend([1, 2, 3]);
        let borrowed: Vec<&i64> = (&multiset).into_iter().collect();
        assert_eq!(borrowed, vec![&1, &2, &3]);
        assert_eq!(multiset.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
