//! Error types for StackKV core.
//!
//! None of these are fatal: the command loop prints the message and keeps
//! reading input.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Conditions reported by stack operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// `Pop` was requested with an empty stack.
    #[error("No Active Transactions")]
    NoActiveTransaction,

    /// `Commit` was requested with an empty stack.
    #[error("Nothing to commit")]
    NothingToCommit,
}

/// Malformed input lines, detected before any core operation runs.
///
/// The `verb` is echoed exactly as the user typed it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// A required argument is absent.
    #[error("Maybe `{verb}` missing an argument?")]
    MissingArgument {
        /// Verb as typed.
        verb: String,
    },

    /// A command that takes no arguments was given one.
    #[error("`{verb}` doesn't require an argument!")]
    UnexpectedArgument {
        /// Verb as typed.
        verb: String,
    },

    /// The verb is not one of the known commands.
    #[error("Invalid Command: {verb}\nValid commands are: {}", crate::VALID_COMMANDS.join(", "))]
    Unknown {
        /// Verb as typed.
        verb: String,
    },
}

impl CommandError {
    /// Creates a missing argument error.
    pub fn missing_argument(verb: impl Into<String>) -> Self {
        Self::MissingArgument { verb: verb.into() }
    }

    /// Creates an unexpected argument error.
    pub fn unexpected_argument(verb: impl Into<String>) -> Self {
        Self::UnexpectedArgument { verb: verb.into() }
    }

    /// Creates an unknown command error.
    pub fn unknown(verb: impl Into<String>) -> Self {
        Self::Unknown { verb: verb.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_messages() {
        assert_eq!(
            CoreError::NoActiveTransaction.to_string(),
            "No Active Transactions"
        );
        assert_eq!(CoreError::NothingToCommit.to_string(), "Nothing to commit");
    }

    #[test]
    fn command_messages_echo_verb() {
        assert_eq!(
            CommandError::missing_argument("read").to_string(),
            "Maybe `read` missing an argument?"
        );
        assert_eq!(
            CommandError::unexpected_argument("START").to_string(),
            "`START` doesn't require an argument!"
        );
    }

    #[test]
    fn unknown_lists_valid_commands() {
        let msg = CommandError::unknown("FOO").to_string();
        assert_eq!(
            msg,
            "Invalid Command: FOO\nValid commands are: READ, WRITE, DELETE, START, COMMIT, ABORT, QUIT"
        );
    }
}
