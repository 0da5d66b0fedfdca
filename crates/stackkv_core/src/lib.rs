//! # StackKV Core
//!
//! In-memory key/value store with nested transactions organised as a stack.
//!
//! This crate provides:
//! - The committed baseline mapping ([`GlobalStore`])
//! - Transaction overlays and the LIFO transaction stack ([`TxStack`])
//! - Key resolution against the active transaction
//! - The line command model ([`Command`], [`Reply`])
//! - A lock-guarded, cloneable [`Session`] handle
//!
//! ## Usage
//!
//! ```rust
//! use stackkv_core::{Command, Reply, Session};
//!
//! let session = Session::new();
//! session.execute(Command::Start);
//! session.execute(Command::Write { key: "a".into(), value: "1".into() });
//! session.execute(Command::Commit);
//!
//! assert_eq!(session.execute(Command::Read { key: "a".into() }), Reply::Value("1".into()));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod command;
mod config;
mod error;
mod session;
mod stats;
mod store;
mod transaction;
mod types;

pub use command::{Command, Reply, VALID_COMMANDS};
pub use config::{SessionConfig, DEFAULT_PROMPT};
pub use error::{CommandError, CoreError, CoreResult};
pub use session::Session;
pub use stats::{SessionStats, StatsSnapshot};
pub use store::GlobalStore;
pub use transaction::{Overlay, Tx, TxStack};
pub use types::{Scope, TxId};

/// Crate version, as reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
