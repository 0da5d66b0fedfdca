//! Nested transactions.
//!
//! Transactions form a LIFO stack above the [`GlobalStore`](crate::GlobalStore):
//! - **Push** opens an empty overlay above the current top
//! - **Pop** discards the top overlay (abort)
//! - **Commit** merges the top overlay into the global store and into its
//!   immediate parent, without popping
//!
//! Reads only consult the active overlay. Deletes cascade through every
//! ancestor overlay.

mod stack;
mod state;

pub use stack::TxStack;
pub use state::{Overlay, Tx};
