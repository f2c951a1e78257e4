//! Error types.
//!
//! The core operations of this crate have no recoverable failure modes:
//! [`select_kth`](crate::selection::select_kth) panics on a violated
//! precondition and [`HalvingMultiset`](crate::multiset::HalvingMultiset)
//! never produces one. The errors here cover the checked selection entry
//! point and the command-stream parser.

use thiserror::Error;

/// Errors reported by [`try_select_kth`](crate::selection::try_select_kth).
///
/// # Examples
///
/// ```rust
/// use halfset::error::SelectionError;
/// use halfset::selection::try_select_kth;
///
/// assert_eq!(try_select_kth(Vec::<i64>::new(), 0), Err(SelectionError::EmptyInput));
/// assert_eq!(
///     try_select_kth(vec![1, 2, 3], 3),
///     Err(SelectionError::IndexOutOfBounds { index: 3, length: 3 })
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The input sequence contained no values.
    #[error("cannot select from an empty sequence")]
    EmptyInput,
    /// The requested sorted position is past the end of the input.
    #[error("index {index} is out of bounds for a sequence of length {length}")]
    IndexOutOfBounds {
        /// The requested sorted position.
        index: usize,
        /// Length of the input sequence.
        length: usize,
    },
}

/// Errors reported while parsing a command stream.
///
/// `position` fields are 0-indexed token positions in the input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The leading operation count is not a non-negative integer.
    #[error("invalid operation count `{token}`")]
    InvalidCount {
        /// The offending token.
        token: String,
    },
    /// The input ended before all announced operations were read.
    #[error("unexpected end of input at token {position}: expected {expected}")]
    UnexpectedEnd {
        /// What the parser was looking for.
        expected: &'static str,
        /// Position where the token was expected.
        position: usize,
    },
    /// An operation code other than `1`, `2` or `3`.
    #[error("unknown opcode `{opcode}` at token {position}")]
    UnknownOpcode {
        /// The offending token.
        opcode: String,
        /// Position of the token.
        position: usize,
    },
    /// The operand of an insert is not a representable integer.
    #[error("invalid value `{token}` at token {position}")]
    InvalidValue {
        /// The offending token.
        token: String,
        /// Position of the token.
        position: usize,
    },
}
