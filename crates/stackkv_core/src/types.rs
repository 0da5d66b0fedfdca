//! Core type definitions for StackKV.

use std::fmt;

/// Identifier of a pushed transaction.
///
/// Identifiers are monotonically increasing per stack and never reused,
/// even after the transaction is popped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TxId(pub u64);

impl TxId {
    /// Creates a new transaction ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns the next transaction ID.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tx:{}", self.0)
    }
}

/// Where reads and writes are currently routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// No transaction is active; operations hit the global store.
    Global,
    /// Operations hit the overlay of the given (top) transaction.
    Transaction(TxId),
}

impl Scope {
    /// Returns true if a transaction is active.
    #[must_use]
    pub const fn in_transaction(self) -> bool {
        matches!(self, Self::Transaction(_))
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Transaction(id) => write!(f, "{id}"),
        }
    }
}
