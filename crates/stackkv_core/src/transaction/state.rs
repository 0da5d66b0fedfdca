//! Transaction state.

use crate::types::TxId;
use std::collections::HashMap;

/// Uncommitted writes owned by one transaction.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Overlay {
    writes: HashMap<String, String>,
}

impl Overlay {
    /// Creates an empty overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a key in this overlay only.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.writes.get(key).map(String::as_str)
    }

    /// Records a write, replacing any earlier one for the same key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.writes.insert(key.into(), value.into());
    }

    /// Forgets a key.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.writes.remove(key)
    }

    /// Returns true if the key has been written here.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.writes.contains_key(key)
    }

    /// Number of keys written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Returns true if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Iterates over the pending writes in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.writes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// One transaction on the stack.
///
/// The parent link is an index into the owning stack's frame list, or
/// `None` when the transaction sits directly above the global store.
#[derive(Debug, Clone)]
pub struct Tx {
    id: TxId,
    parent: Option<usize>,
    overlay: Overlay,
}

impl Tx {
    /// Creates an empty transaction.
    pub(crate) fn new(id: TxId, parent: Option<usize>) -> Self {
        Self {
            id,
            parent,
            overlay: Overlay::new(),
        }
    }

    /// Returns the transaction ID.
    #[must_use]
    pub fn id(&self) -> TxId {
        self.id
    }

    /// Returns the index of the transaction beneath this one.
    #[must_use]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Returns the pending writes.
    #[must_use]
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub(crate) fn overlay_mut(&mut self) -> &mut Overlay {
        &mut self.overlay
    }
}
