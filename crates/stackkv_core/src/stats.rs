//! Session statistics.
//!
//! Counters are atomic so they can be read from any clone of a
//! [`Session`](crate::Session) without taking the stack lock.

use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Session statistics.
#[derive(Debug, Default)]
pub struct SessionStats {
    // Key operations
    /// Total number of `READ`s.
    reads: AtomicU64,
    /// Total number of `WRITE`s.
    writes: AtomicU64,
    /// Total number of `DELETE`s.
    deletes: AtomicU64,

    // Transaction counters
    /// Total number of `START`s.
    transactions_started: AtomicU64,
    /// Total number of successful `COMMIT`s.
    transactions_committed: AtomicU64,
    /// Total number of successful `ABORT`s.
    transactions_aborted: AtomicU64,
    /// Keys merged outward by commits.
    keys_merged: AtomicU64,

    /// Lines rejected before reaching the stack.
    rejected_commands: AtomicU64,
}

impl SessionStats {
    /// Creates a new stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_transaction_start(&self) {
        self.transactions_started.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_transaction_commit(&self, merged: usize) {
        self.transactions_committed.fetch_add(1, Ordering::Relaxed);
        self.keys_merged.fetch_add(merged as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_transaction_abort(&self) {
        self.transactions_aborted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected(&self) {
        self.rejected_commands.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the total number of reads.
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Returns the total number of writes.
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Returns the total number of deletes.
    pub fn deletes(&self) -> u64 {
        self.deletes.load(Ordering::Relaxed)
    }

    /// Returns the total number of transactions started.
    pub fn transactions_started(&self) -> u64 {
        self.transactions_started.load(Ordering::Relaxed)
    }

    /// Returns the total number of transactions committed.
    pub fn transactions_committed(&self) -> u64 {
        self.transactions_committed.load(Ordering::Relaxed)
    }

    /// Returns the total number of transactions aborted.
    pub fn transactions_aborted(&self) -> u64 {
        self.transactions_aborted.load(Ordering::Relaxed)
    }

    /// Returns the number of keys merged by commits.
    pub fn keys_merged(&self) -> u64 {
        self.keys_merged.load(Ordering::Relaxed)
    }

    /// Returns the number of rejected input lines.
    pub fn rejected_commands(&self) -> u64 {
        self.rejected_commands.load(Ordering::Relaxed)
    }

    /// Returns a snapshot of all stats.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            reads: self.reads(),
            writes: self.writes(),
            deletes: self.deletes(),
            transactions_started: self.transactions_started(),
            transactions_committed: self.transactions_committed(),
            transactions_aborted: self.transactions_aborted(),
            keys_merged: self.keys_merged(),
            rejected_commands: self.rejected_commands(),
        }
    }
}

/// A point-in-time snapshot of session statistics.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StatsSnapshot {
    /// Total number of reads.
    pub reads: u64,
    /// Total number of writes.
    pub writes: u64,
    /// Total number of deletes.
    pub deletes: u64,
    /// Total number of transactions started.
    pub transactions_started: u64,
    /// Total number of transactions committed.
    pub transactions_committed: u64,
    /// Total number of transactions aborted.
    pub transactions_aborted: u64,
    /// Keys merged outward by commits.
    pub keys_merged: u64,
    /// Lines rejected before reaching the stack.
    pub rejected_commands: u64,
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Session Statistics")?;
        writeln!(f, "==================")?;
        writeln!(f, "  Reads:                  {}", self.reads)?;
        writeln!(f, "  Writes:                 {}", self.writes)?;
        writeln!(f, "  Deletes:                {}", self.deletes)?;
        writeln!(f, "  Transactions started:   {}", self.transactions_started)?;
        writeln!(f, "  Transactions committed: {}", self.transactions_committed)?;
        writeln!(f, "  Transactions aborted:   {}", self.transactions_aborted)?;
        writeln!(f, "  Keys merged:            {}", self.keys_merged)?;
        write!(f, "  Rejected commands:      {}", self.rejected_commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stats_are_zero() {
        let stats = SessionStats::new();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn record_transactions() {
        let stats = SessionStats::new();

        stats.record_transaction_start();
        stats.record_transaction_start();
        stats.record_transaction_commit(3);
        stats.record_transaction_abort();

        assert_eq!(stats.transactions_started(), 2);
        assert_eq!(stats.transactions_committed(), 1);
        assert_eq!(stats.transactions_aborted(), 1);
        assert_eq!(stats.keys_merged(), 3);
    }

    #[test]
    fn snapshot_serializes() {
        let stats = SessionStats::new();
        stats.record_read();
        stats.record_write();
        stats.record_rejected();

        let json = serde_json::to_value(stats.snapshot()).unwrap();
        assert_eq!(json["reads"], 1);
        assert_eq!(json["writes"], 1);
        assert_eq!(json["rejected_commands"], 1);
    }

    #[test]
    fn concurrent_updates() {
        use std::sync::Arc;
        use std::thread;

        let stats = Arc::new(SessionStats::new());
        let mut handles = vec![];

        for _ in 0..10 {
            let s = Arc::clone(&stats);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    s.record_read();
                    s.record_delete();
                }
            }));
        }

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(stats.reads(), 1000);
        assert_eq!(stats.deletes(), 1000);
    }
}
