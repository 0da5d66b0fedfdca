//! StackKV shell
//!
//! Interactive key/value store with nested transactions.
//!
//! # Commands
//!
//! - `READ key` - Print the value of `key` in the active scope
//! - `WRITE key value` - Set `key` in the active scope
//! - `DELETE key` - Remove `key` from the active scope and its ancestors
//! - `START` - Open a nested transaction
//! - `COMMIT` - Merge the active transaction outward and close it
//! - `ABORT` - Discard the active transaction
//! - `QUIT` - Exit

use clap::Parser;
use stackkv_cli::{render_stats, Repl, StatsFormat};
use stackkv_core::{Session, SessionConfig};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// In-memory key/value store with nested transactions.
#[derive(Parser)]
#[command(name = "stackkv")]
#[command(author, version = stackkv_core::VERSION, about, long_about = None)]
struct Cli {
    /// Read commands from this file instead of standard input
    script: Option<PathBuf>,

    /// Prompt printed before each command
    #[arg(long, default_value = stackkv_core::DEFAULT_PROMPT)]
    prompt: String,

    /// Only accept upper-case verbs
    #[arg(long)]
    case_sensitive: bool,

    /// Print session statistics to stderr on exit (text, json)
    #[arg(long)]
    stats: Option<StatsFormat>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the command protocol.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    info!(version = stackkv_core::VERSION, "starting stackkv");

    let config = SessionConfig::new()
        .prompt(cli.prompt)
        .verbs_case_insensitive(!cli.case_sensitive);
    let repl = Repl::new(Session::with_config(config));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let reason = match &cli.script {
        Some(path) => {
            info!("Running script {:?}", path);
            let file = File::open(path).map_err(|e| format!("cannot open {path:?}: {e}"))?;
            repl.run(BufReader::new(file), &mut out)?
        }
        None => repl.run(io::stdin().lock(), &mut out)?,
    };
    info!(?reason, "session ended");

    if let Some(format) = cli.stats {
        eprintln!("{}", render_stats(&repl.session().stats(), format)?);
    }

    Ok(())
}
