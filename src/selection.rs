//! Deterministic order-statistic selection.
//!
//! This module provides [`select_kth`], which returns the value that would
//! occupy a given position if its input were sorted, in worst-case linear
//! time and without sorting the input.
//!
//! # Algorithm
//!
//! Selection uses the median-of-medians pivot rule:
//!
//! 1. Inputs of at most [`BASE_CASE_LEN`] values are sorted directly.
//! 2. Larger inputs are split into groups of [`GROUP_LEN`] values and the
//!    median of every group is collected.
//! 3. The median of those medians is selected recursively and becomes the
//!    pivot.
//! 4. The input is partitioned into values less than, equal to and greater
//!    than the pivot. Selection continues in the bucket containing the
//!    requested position, or returns the pivot when the position falls in
//!    the equal bucket.
//!
//! The pivot is guaranteed to have at least `3n/10 - 6` values on each side,
//! so every step discards a constant fraction of the input:
//!
//! ```text
//! T(n) = T(n/5) + T(7n/10 + 6) + O(n) = O(n)
//! ```
//!
//! # Time Complexity
//!
//! | Operation              | Worst case | Extra space |
//! |------------------------|------------|-------------|
//! | `select_kth`           | O(n)       | O(n)        |
//! | `try_select_kth`       | O(n)       | O(n)        |
//! | `select_kth_with_stats`| O(n)       | O(n)        |
//! | `median`               | O(n)       | O(n)        |
//!
//! # Ownership
//!
//! Every entry point takes its input `Vec` by value. Selection reorders and
//! consumes the buffer, so a caller that needs to keep the original contents
//! passes a copy.
//!
//! # Examples
//!
//! ```rust
//! use halfset::selection::{median, select_kth};
//!
//! let values = vec![9, 1, 8, 2, 7, 3];
//! assert_eq!(select_kth(values.clone(), 0), 1);
//! assert_eq!(select_kth(values.clone(), 4), 8);
//! assert_eq!(median(values), Some(3));
//! ```

use std::cmp::Ordering;

use crate::error::SelectionError;

/// Inputs of at most this many values are sorted directly.
pub const BASE_CASE_LEN: usize = 50;

/// Number of values per group when computing the median of medians.
pub const GROUP_LEN: usize = 5;

/// Work counters collected during one selection run.
///
/// Returned by [`select_kth_with_stats`]. The counters make the linear-time
/// guarantee observable: `comparisons` stays below a fixed multiple of the
/// input length for every input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionStats {
    /// Number of element comparisons performed.
    pub comparisons: u64,
    /// Number of selection steps, counting the median-of-medians recursion
    /// and every narrowing into a partition bucket.
    pub calls: u64,
    /// Deepest nesting of the median-of-medians recursion. A run that never
    /// leaves the base case has depth 0.
    pub max_depth: usize,
}

/// Returns the value at sorted position `k` (0-indexed) of `values`.
///
/// Equivalent to sorting `values` and reading index `k`, but runs in
/// worst-case linear time.
///
/// # Panics
///
/// Panics if `k >= values.len()`. Use [`try_select_kth`] for a checked
/// variant.
///
/// # Examples
///
/// ```rust
/// use halfset::selection::select_kth;
///
/// let values: Vec<i64> = (0..1000).rev().collect();
/// assert_eq!(select_kth(values, 250), 250);
///
/// // Duplicates occupy consecutive sorted positions.
/// assert_eq!(select_kth(vec![4, 4, 1, 4], 1), 4);
/// ```
#[must_use]
pub fn select_kth<T: Ord + Clone>(values: Vec<T>, k: usize) -> T {
    select_kth_with_stats(values, k).0
}

/// Checked variant of [`select_kth`].
///
/// # Errors
///
/// Returns [`SelectionError::EmptyInput`] if `values` is empty and
/// [`SelectionError::IndexOutOfBounds`] if `k >= values.len()`.
pub fn try_select_kth<T: Ord + Clone>(values: Vec<T>, k: usize) -> Result<T, SelectionError> {
    if values.is_empty() {
        return Err(SelectionError::EmptyInput);
    }
    if k >= values.len() {
        return Err(SelectionError::IndexOutOfBounds {
            index: k,
            length: values.len(),
        });
    }
    Ok(select_kth(values, k))
}

/// Like [`select_kth`], also returning the work performed.
///
/// # Panics
///
/// Panics if `k >= values.len()`.
///
/// # Examples
///
/// ```rust
/// use halfset::selection::select_kth_with_stats;
///
/// let values: Vec<i64> = (0..10_000).collect();
/// let (value, stats) = select_kth_with_stats(values, 5_000);
/// assert_eq!(value, 5_000);
/// assert!(stats.comparisons < 64 * 10_000);
/// ```
#[must_use]
pub fn select_kth_with_stats<T: Ord + Clone>(values: Vec<T>, k: usize) -> (T, SelectionStats) {
    let length = values.len();
    assert!(
        k < length,
        "select_kth: index {k} is out of bounds for a sequence of length {length}"
    );

    let mut selector = Selector::default();
    let value = selector.select(values, k, 0);

    tracing::trace!(
        length,
        index = k,
        comparisons = selector.stats.comparisons,
        calls = selector.stats.calls,
        max_depth = selector.stats.max_depth,
        "selected order statistic"
    );

    (value, selector.stats)
}

/// Returns the lower median of `values`, or `None` if it is empty.
///
/// For an even number of values this is the smaller of the two middle
/// values.
///
/// # Examples
///
/// ```rust
/// use halfset::selection::median;
///
/// assert_eq!(median(vec![5, 1, 3]), Some(3));
/// assert_eq!(median(vec![4, 1, 3, 2]), Some(2));
/// assert_eq!(median(Vec::<i64>::new()), None);
/// ```
#[must_use]
pub fn median<T: Ord + Clone>(values: Vec<T>) -> Option<T> {
    if values.is_empty() {
        return None;
    }
    let middle = (values.len() - 1) / 2;
    Some(select_kth(values, middle))
}

#[derive(Default)]
struct Selector {
    stats: SelectionStats,
}

impl Selector {
    #[inline]
    fn compare<T: Ord>(&mut self, left: &T, right: &T) -> Ordering {
        self.stats.comparisons += 1;
        left.cmp(right)
    }

    /// Selects position `k` of `values`. The partition step narrows in a
    /// loop; only the median-of-medians step recurses, so the stack depth is
    /// logarithmic in the input length.
    fn select<T: Ord + Clone>(&mut self, mut values: Vec<T>, mut k: usize, depth: usize) -> T {
        debug_assert!(k < values.len());
        self.stats.max_depth = self.stats.max_depth.max(depth);

        loop {
            self.stats.calls += 1;

            if values.len() <= BASE_CASE_LEN {
                self.insertion_sort(&mut values);
                return values.swap_remove(k);
            }

            let mut medians = Vec::with_capacity(values.len().div_ceil(GROUP_LEN));
            for group in values.chunks_mut(GROUP_LEN) {
                self.insertion_sort(group);
                medians.push(group[group.len() / 2].clone());
            }

            let middle = medians.len() / 2;
            let pivot = self.select(medians, middle, depth + 1);

            let mut less = Vec::new();
            let mut greater = Vec::new();
            let mut equal = 0;
            for value in values {
                match self.compare(&value, &pivot) {
                    Ordering::Less => less.push(value),
                    Ordering::Equal => equal += 1,
                    Ordering::Greater => greater.push(value),
                }
            }

            if k < less.len() {
                values = less;
            } else if k < less.len() + equal {
                return pivot;
            } else {
                k -= less.len() + equal;
                values = greater;
            }
        }
    }

    fn insertion_sort<T: Ord>(&mut self, slice: &mut [T]) {
        for unsorted in 1..slice.len() {
            let mut position = unsorted;
            while position > 0
                && self.compare(&slice[position - 1], &slice[position]) == Ordering::Greater
            {
                slice.swap(position - 1, position);
                position -= 1;
            }
        }
    }
}
