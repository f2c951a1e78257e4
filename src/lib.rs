//! # halfset
//!
//! A multiset of integers supporting two operations: inserting a value and
//! deleting the largest half of the current values.
//!
//! ## Overview
//!
//! - **Selection**: deterministic median-of-medians order-statistic
//!   selection in worst-case linear time ([`selection`])
//! - **Halving Multiset**: unordered multiset whose delete-largest-half
//!   operation partitions around a selected threshold ([`multiset`])
//! - **Commands**: parser and runner for the textual operation stream used
//!   by the `halfset` binary ([`command`])
//!
//! Insertion is O(1) and each delete-largest-half costs O(n) while halving
//! the size, so any sequence of m operations runs in O(m) total time.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`HalvingMultiset`]
//!
//! ## Example
//!
//! ```rust
//! use halfset::prelude::*;
//!
//! let mut multiset = HalvingMultiset::new();
//! for value in [10, 3, 7] {
//!     multiset.insert(value);
//! }
//! multiset.delete_largest_half();
//! assert_eq!(multiset.snapshot(), &[3, 7]);
//!
//! assert_eq!(select_kth(vec![10, 3, 7], 1), 7);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and functions.
///
/// # Usage
///
/// ```rust
/// use halfset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::multiset::{HalvingMultiset, HalvingReport};
    pub use crate::selection::{median, select_kth, select_kth_with_stats, try_select_kth};
}

pub mod command;
pub mod error;
pub mod multiset;
pub mod selection;

pub use multiset::{HalvingMultiset, HalvingReport};
