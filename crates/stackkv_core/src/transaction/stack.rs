//! Transaction stack.

use crate::error::{CoreError, CoreResult};
use crate::store::GlobalStore;
use crate::transaction::state::Tx;
use crate::types::{Scope, TxId};
use tracing::{debug, trace};

/// LIFO stack of transactions rooted in a [`GlobalStore`].
///
/// Frames live in an array; each frame's parent is the index of the frame
/// beneath it. The last frame is the active transaction. All methods take
/// `&self`/`&mut self`, so callers that share a stack across threads must
/// hold one lock for each whole operation (see [`Session`](crate::Session)).
///
/// ## Resolution rules
///
/// - `get` reads the active overlay only, never falling through to parent
///   overlays or the global store.
/// - `set` writes to the active overlay, or the global store when the
///   stack is empty.
/// - `delete` removes the key from the active overlay and every ancestor
///   overlay, or from the global store when the stack is empty.
/// - `commit` writes every pending pair into the global store and into the
///   immediate parent overlay, then leaves the transaction in place.
#[derive(Debug)]
pub struct TxStack {
    global: GlobalStore,
    frames: Vec<Tx>,
    next_id: TxId,
}

impl Default for TxStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TxStack {
    /// Creates an empty stack over an empty global store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(GlobalStore::new())
    }

    /// Creates an empty stack over an existing global store.
    #[must_use]
    pub fn with_store(global: GlobalStore) -> Self {
        Self {
            global,
            frames: Vec::new(),
            next_id: TxId::new(1),
        }
    }

    /// Opens a new empty transaction above the current top.
    pub fn push(&mut self) -> TxId {
        let id = self.next_id;
        self.next_id = id.next();
        let parent = self.frames.len().checked_sub(1);
        self.frames.push(Tx::new(id, parent));
        debug!(txid = %id, depth = self.depth(), "transaction started");
        id
    }

    /// Discards the active transaction without merging anything.
    pub fn pop(&mut self) -> CoreResult<TxId> {
        let tx = self.frames.pop().ok_or(CoreError::NoActiveTransaction)?;
        debug!(
            txid = %tx.id(),
            discarded = tx.overlay().len(),
            depth = self.depth(),
            "transaction popped"
        );
        Ok(tx.id())
    }

    /// Returns the active transaction, if any.
    #[must_use]
    pub fn peek(&self) -> Option<&Tx> {
        self.frames.last()
    }

    /// Merges the active overlay outward. Does not pop.
    ///
    /// Returns the number of keys merged.
    pub fn commit(&mut self) -> CoreResult<usize> {
        let merged = self.propagate_commit()?;
        debug!(scope = %self.scope(), merged, "transaction committed");
        Ok(merged)
    }

    /// Writes every pair of the top overlay into the global store and, when
    /// present, into the parent overlay.
    ///
    /// The global store is written even while ancestors remain open.
    fn propagate_commit(&mut self) -> CoreResult<usize> {
        let (top, below) = self
            .frames
            .split_last_mut()
            .ok_or(CoreError::NothingToCommit)?;
        let mut parent = top.parent().and_then(|idx| below.get_mut(idx));

        for (key, value) in top.overlay().iter() {
            self.global.set(key, value);
            if let Some(parent) = parent.as_mut() {
                trace!(key, txid = %parent.id(), "merged into parent");
                parent.overlay_mut().set(key, value);
            }
        }
        Ok(top.overlay().len())
    }

    /// Reads a key from the active scope.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        match self.peek() {
            Some(tx) => tx.overlay().get(key),
            None => self.global.get(key),
        }
    }

    /// Writes a key into the active scope.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let (key, value): (String, String) = (key.into(), value.into());
        trace!(key = %key, scope = %self.scope(), "set");
        match self.frames.last_mut() {
            Some(tx) => tx.overlay_mut().set(key, value),
            None => self.global.set(key, value),
        }
    }

    /// Deletes a key from the active scope.
    ///
    /// Inside a transaction the removal cascades through every ancestor
    /// overlay. Returns true if the key was present anywhere it was removed
    /// from.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.frames.is_empty() {
            trace!(key, "delete from global store");
            return self.global.remove(key).is_some();
        }
        self.cascade_delete(key) > 0
    }

    /// Removes `key` from the top overlay and each ancestor reached through
    /// parent links. The global store is not touched.
    ///
    /// Returns how many overlays held the key.
    fn cascade_delete(&mut self, key: &str) -> usize {
        let mut removed = 0;
        let mut cursor = self.frames.len().checked_sub(1);
        while let Some(idx) = cursor {
            let tx = &mut self.frames[idx];
            if tx.overlay_mut().remove(key).is_some() {
                trace!(key, txid = %tx.id(), "removed from overlay");
                removed += 1;
            }
            cursor = tx.parent();
        }
        removed
    }

    /// Returns where reads and writes are routed.
    #[must_use]
    pub fn scope(&self) -> Scope {
        self.peek().map_or(Scope::Global, |tx| Scope::Transaction(tx.id()))
    }

    /// Number of open transactions.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if no transaction is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Counts transactions by following parent links from the top.
    ///
    /// Always equal to [`depth`](Self::depth).
    #[must_use]
    pub fn chain_len(&self) -> usize {
        let mut len = 0;
        let mut cursor = self.frames.len().checked_sub(1);
        while let Some(idx) = cursor {
            len += 1;
            cursor = self.frames[idx].parent();
        }
        len
    }

    /// Returns the transaction at `index` (0 is the outermost).
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<&Tx> {
        self.frames.get(index)
    }

    /// Returns the committed baseline.
    #[must_use]
    pub fn global(&self) -> &GlobalStore {
        &self.global
    }
}
