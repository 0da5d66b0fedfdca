//! Line commands and their replies.
//!
//! A line is split on whitespace into a verb and arguments. Commands that
//! need arguments ignore any extras; commands that take none reject them.

use crate::error::{CommandError, CoreError};
use std::fmt;

/// Verbs accepted by [`Command::parse`], in the order they are listed to
/// the user.
pub const VALID_COMMANDS: [&str; 7] = [
    "READ", "WRITE", "DELETE", "START", "COMMIT", "ABORT", "QUIT",
];

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `READ key`
    Read {
        /// Key to look up.
        key: String,
    },
    /// `WRITE key value`
    Write {
        /// Key to write.
        key: String,
        /// Value to store.
        value: String,
    },
    /// `DELETE key`
    Delete {
        /// Key to remove.
        key: String,
    },
    /// `START`
    Start,
    /// `COMMIT`: merge the active transaction outward, then pop it.
    Commit,
    /// `ABORT`: pop the active transaction.
    Abort,
    /// `QUIT`
    Quit,
}

impl Command {
    /// Parses a line with case-insensitive verbs.
    ///
    /// Returns `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        Self::parse_with(line, true)
    }

    /// Parses a line, matching verbs case-insensitively when asked to.
    pub fn parse_with(line: &str, case_insensitive: bool) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let normalized = if case_insensitive {
            verb.to_ascii_uppercase()
        } else {
            verb.to_string()
        };

        let command = match normalized.as_str() {
            "READ" => match args.as_slice() {
                [key, ..] => Self::Read {
                    key: (*key).to_string(),
                },
                [] => return Err(CommandError::missing_argument(verb)),
            },
            "WRITE" => match args.as_slice() {
                [key, value, ..] => Self::Write {
                    key: (*key).to_string(),
                    value: (*value).to_string(),
                },
                _ => return Err(CommandError::missing_argument(verb)),
            },
            "DELETE" => match args.as_slice() {
                [key, ..] => Self::Delete {
                    key: (*key).to_string(),
                },
                [] => return Err(CommandError::missing_argument(verb)),
            },
            "START" => Self::no_args(verb, &args, Self::Start)?,
            "COMMIT" => Self::no_args(verb, &args, Self::Commit)?,
            "ABORT" => Self::no_args(verb, &args, Self::Abort)?,
            "QUIT" => Self::no_args(verb, &args, Self::Quit)?,
            _ => return Err(CommandError::unknown(verb)),
        };
        Ok(Some(command))
    }

    fn no_args(verb: &str, args: &[&str], command: Self) -> Result<Self, CommandError> {
        if args.is_empty() {
            Ok(command)
        } else {
            Err(CommandError::unexpected_argument(verb))
        }
    }

    /// Canonical upper-case verb.
    #[must_use]
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Read { .. } => "READ",
            Self::Write { .. } => "WRITE",
            Self::Delete { .. } => "DELETE",
            Self::Start => "START",
            Self::Commit => "COMMIT",
            Self::Abort => "ABORT",
            Self::Quit => "QUIT",
        }
    }
}

/// Effect of one input line, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Nothing to print.
    Done,
    /// `READ` found a value.
    Value(String),
    /// `READ` missed with no transaction active.
    NotSet(String),
    /// `READ` missed in the active transaction's overlay.
    KeyNotFound(String),
    /// A stack operation had nothing to act on.
    Notice(CoreError),
    /// The line was rejected before reaching the stack.
    Rejected(CommandError),
    /// `QUIT` was entered.
    Exit,
}

impl Reply {
    /// Returns true if this reply prints nothing.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if the command loop should stop.
    #[must_use]
    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Exit)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done => Ok(()),
            Self::Value(value) => f.write_str(value),
            Self::NotSet(key) => write!(f, "{key} not set"),
            Self::KeyNotFound(key) => write!(f, "Key not found {key}"),
            Self::Notice(err) => write!(f, "{err}"),
            Self::Rejected(err) => write!(f, "{err}"),
            Self::Exit => f.write_str("Exiting..."),
        }
    }
}
