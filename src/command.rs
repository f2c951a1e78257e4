//! Command-stream front end for [`HalvingMultiset`].
//!
//! The text format is a whitespace separated token stream: an operation
//! count `q` followed by `q` operations.
//!
//! ```text
//! 7
//! 1 10      insert 10
//! 1 3
//! 1 7
//! 2         delete the largest half
//! 1 5
//! 2
//! 3         dump the current state
//! ```
//!
//! # Examples
//!
//! ```rust
//! use halfset::command::{parse_commands, CommandRunner};
//!
//! let commands = parse_commands("7 1 10 1 3 1 7 2 1 5 2 2").unwrap();
//! let mut runner = CommandRunner::new();
//! let dumps = runner.run(commands);
//!
//! assert!(dumps.is_empty());
//! assert_eq!(runner.finish(), "1\n3 \n");
//! ```

use std::fmt::{self, Write as _};

use crate::error::CommandError;
use crate::multiset::HalvingMultiset;

/// One operation of a command stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// `1 x`: insert `x`.
    Insert(i64),
    /// `2`: delete the largest half.
    DeleteLargestHalf,
    /// `3`: render the current state.
    Dump,
}

impl fmt::Display for Command {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert(value) => write!(formatter, "1 {value}"),
            Self::DeleteLargestHalf => formatter.write_str("2"),
            Self::Dump => formatter.write_str("3"),
        }
    }
}

/// Parses a command stream.
///
/// Input without any tokens yields no commands. Tokens after the announced
/// number of operations are ignored.
///
/// # Errors
///
/// Returns a [`CommandError`] describing the first malformed token, or
/// [`CommandError::UnexpectedEnd`] if the input holds fewer operations than
/// announced.
///
/// # Examples
///
/// ```rust
/// use halfset::command::{parse_commands, Command};
///
/// let commands = parse_commands("3\n1 -4\n2\n3\n").unwrap();
/// assert_eq!(
///     commands,
///     vec![Command::Insert(-4), Command::DeleteLargestHalf, Command::Dump]
/// );
/// ```
pub fn parse_commands(input: &str) -> Result<Vec<Command>, CommandError> {
    let mut tokens = Tokens::new(input);

    let Some((_, count)) = tokens.advance() else {
        return Ok(Vec::new());
    };
    let count: usize = count.parse().map_err(|_| CommandError::InvalidCount {
        token: count.to_string(),
    })?;

    // The count comes from untrusted input; every operation needs a token.
    let mut commands = Vec::with_capacity(count.min(tokens.token_upper_bound()));
    for _ in 0..count {
        let (position, opcode) = tokens.expect("opcode")?;
        let command = match opcode {
            "1" => {
                let (position, token) = tokens.expect("value")?;
                let value = token.parse().map_err(|_| CommandError::InvalidValue {
                    token: token.to_string(),
                    position,
                })?;
                Command::Insert(value)
            }
            "2" => Command::DeleteLargestHalf,
            "3" => Command::Dump,
            _ => {
                return Err(CommandError::UnknownOpcode {
                    opcode: opcode.to_string(),
                    position,
                });
            }
        };
        commands.push(command);
    }

    tracing::debug!(operations = commands.len(), "parsed command stream");
    Ok(commands)
}

struct Tokens<'a> {
    inner: std::iter::Enumerate<std::str::SplitWhitespace<'a>>,
    consumed: usize,
    input_len: usize,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            inner: input.split_whitespace().enumerate(),
            consumed: 0,
            input_len: input.len(),
        }
    }

    fn advance(&mut self) -> Option<(usize, &'a str)> {
        let token = self.inner.next()?;
        self.consumed += 1;
        Some(token)
    }

    fn expect(&mut self, expected: &'static str) -> Result<(usize, &'a str), CommandError> {
        let position = self.consumed;
        self.advance()
            .ok_or(CommandError::UnexpectedEnd { expected, position })
    }

    /// Upper bound on the number of tokens in the whole input: each needs
    /// at least one byte plus a separator.
    const fn token_upper_bound(&self) -> usize {
        self.input_len / 2 + 1
    }
}

/// Applies commands to a [`HalvingMultiset`] and renders its state.
#[derive(Clone, Debug, Default)]
pub struct CommandRunner {
    multiset: HalvingMultiset<i64>,
}

impl CommandRunner {
    /// Creates a runner over an empty multiset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one command. Returns the rendered state for [`Command::Dump`].
    pub fn apply(&mut self, command: Command) -> Option<String> {
        tracing::trace!(%command, size = self.multiset.len(), "applying command");
        match command {
            Command::Insert(value) => {
                self.multiset.insert(value);
                None
            }
            Command::DeleteLargestHalf => {
                self.multiset.delete_largest_half();
                None
            }
            Command::Dump => Some(render_dump(&self.multiset)),
        }
    }

    /// Applies every command in order, collecting the dump output.
    pub fn run<I>(&mut self, commands: I) -> Vec<String>
    where
        I: IntoIterator<Item = Command>,
    {
        commands
            .into_iter()
            .filter_map(|command| self.apply(command))
            .collect()
    }

    /// Returns the multiset in its current state.
    #[must_use]
    pub const fn multiset(&self) -> &HalvingMultiset<i64> {
        &self.multiset
    }

    /// Consumes the runner and renders the final output.
    #[must_use]
    pub fn finish(self) -> String {
        render_final(&self.multiset)
    }
}

/// Renders the debug line `S(size=N): v1 v2 ... `.
///
/// # Examples
///
/// ```rust
/// use halfset::command::render_dump;
/// use halfset::multiset::HalvingMultiset;
///
/// let multiset: HalvingMultiset = vec![3, 5].into_iter().collect();
/// assert_eq!(render_dump(&multiset), "S(size=2): 3 5 ");
/// ```
#[must_use]
pub fn render_dump(multiset: &HalvingMultiset<i64>) -> String {
    format!("S(size={}): {}", multiset.len(), render_values(multiset))
}

/// Renders the final output: the size on one line, the values on the next.
#[must_use]
pub fn render_final(multiset: &HalvingMultiset<i64>) -> String {
    format!("{}\n{}\n", multiset.len(), render_values(multiset))
}

fn render_values(multiset: &HalvingMultiset<i64>) -> String {
    multiset.iter().fold(String::new(), |mut rendered, value| {
        let _ = write!(rendered, "{value} ");
        rendered
    })
}
