//! Lock-guarded session handle.

use crate::command::{Command, Reply};
use crate::config::SessionConfig;
use crate::error::CoreResult;
use crate::stats::{SessionStats, StatsSnapshot};
use crate::store::GlobalStore;
use crate::transaction::TxStack;
use crate::types::{Scope, TxId};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// A transaction stack and its global store behind one exclusive lock.
///
/// Every public method acquires the lock once and holds it until the
/// operation is complete, so `Push`, `Pop`, `Commit` and key mutations
/// never interleave. `COMMIT` (commit then pop) runs under a single guard.
///
/// Cloning yields another handle to the same session.
#[derive(Clone)]
pub struct Session {
    stack: Arc<Mutex<TxStack>>,
    stats: Arc<SessionStats>,
    config: Arc<SessionConfig>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session with default configuration and an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Creates a session with the given configuration.
    #[must_use]
    pub fn with_config(config: SessionConfig) -> Self {
        Self::from_parts(config, GlobalStore::new())
    }

    /// Creates a session over a pre-populated global store.
    #[must_use]
    pub fn from_parts(config: SessionConfig, global: GlobalStore) -> Self {
        Self {
            stack: Arc::new(Mutex::new(TxStack::with_store(global))),
            stats: Arc::new(SessionStats::new()),
            config: Arc::new(config),
        }
    }

    /// Returns the session configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Parses and executes one input line.
    ///
    /// Returns `None` for blank lines.
    pub fn execute_line(&self, line: &str) -> Option<Reply> {
        match Command::parse_with(line, self.config.verbs_case_insensitive) {
            Ok(Some(command)) => Some(self.execute(command)),
            Ok(None) => None,
            Err(err) => {
                debug!(error = %err, "rejected input");
                self.stats.record_rejected();
                Some(Reply::Rejected(err))
            }
        }
    }

    /// Executes one parsed command.
    pub fn execute(&self, command: Command) -> Reply {
        debug!(verb = command.verb(), "execute");
        match command {
            Command::Read { key } => {
                let stack = self.stack.lock();
                self.stats.record_read();
                match stack.get(&key) {
                    Some(value) => Reply::Value(value.to_string()),
                    None if stack.scope().in_transaction() => Reply::KeyNotFound(key),
                    None => Reply::NotSet(key),
                }
            }
            Command::Write { key, value } => {
                self.set(key, value);
                Reply::Done
            }
            Command::Delete { key } => {
                self.delete(&key);
                Reply::Done
            }
            Command::Start => {
                self.start();
                Reply::Done
            }
            Command::Commit => match self.commit() {
                Ok(_) => Reply::Done,
                Err(err) => Reply::Notice(err),
            },
            Command::Abort => match self.abort() {
                Ok(_) => Reply::Done,
                Err(err) => Reply::Notice(err),
            },
            Command::Quit => Reply::Exit,
        }
    }

    /// Reads a key from the active scope.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let stack = self.stack.lock();
        self.stats.record_read();
        stack.get(key).map(str::to_string)
    }

    /// Writes a key into the active scope.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut stack = self.stack.lock();
        self.stats.record_write();
        stack.set(key, value);
    }

    /// Deletes a key from the active scope, cascading through ancestors.
    pub fn delete(&self, key: &str) -> bool {
        let mut stack = self.stack.lock();
        self.stats.record_delete();
        stack.delete(key)
    }

    /// Opens a new transaction.
    pub fn start(&self) -> TxId {
        let mut stack = self.stack.lock();
        self.stats.record_transaction_start();
        stack.push()
    }

    /// Commits the active transaction and pops it.
    ///
    /// Returns the number of keys merged.
    pub fn commit(&self) -> CoreResult<usize> {
        let mut stack = self.stack.lock();
        let merged = stack.commit()?;
        stack.pop()?;
        self.stats.record_transaction_commit(merged);
        Ok(merged)
    }

    /// Discards the active transaction.
    pub fn abort(&self) -> CoreResult<TxId> {
        let mut stack = self.stack.lock();
        let id = stack.pop()?;
        self.stats.record_transaction_abort();
        Ok(id)
    }

    /// Number of open transactions.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.lock().depth()
    }

    /// Returns where reads and writes are currently routed.
    #[must_use]
    pub fn scope(&self) -> Scope {
        self.stack.lock().scope()
    }

    /// Returns a copy of the committed baseline.
    #[must_use]
    pub fn global_snapshot(&self) -> GlobalStore {
        self.stack.lock().global().clone()
    }

    /// Runs `f` with exclusive access to the underlying stack.
    pub fn with_stack<R>(&self, f: impl FnOnce(&mut TxStack) -> R) -> R {
        f(&mut *self.stack.lock())
    }

    /// Returns the session statistics.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("depth", &self.depth())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
