//! # StackKV CLI
//!
//! Line-oriented shell over a [`stackkv_core::Session`].
//!
//! One command per line, prompt before each read:
//!
//! ```text
//! > WRITE a 1
//! > START
//! > READ a
//! Key not found a
//! > QUIT
//! Exiting...
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod repl;
pub mod report;

pub use repl::{ExitReason, Repl};
pub use report::{render_stats, StatsFormat};
