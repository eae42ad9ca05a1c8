/// Ordered block-lists mirroring the synced storage shape
use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// Insertion-ordered list of blocked entries. Serializes as a bare JSON
/// array, which is both the persisted storage shape and the export format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct BlockList<E> {
    entries: Vec<E>,
}

impl<E: Entity> BlockList<E> {
    pub fn new() -> Self {
        BlockList {
            entries: Vec::new(),
        }
    }

    pub fn from_entries(entries: Vec<E>) -> Self {
        BlockList { entries }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id() == id)
    }

    /// Append `entry` unless its id is already present. Returns whether the
    /// list changed.
    pub fn block(&mut self, entry: E) -> bool {
        if self.contains(entry.id()) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Remove the entry whose id matches exactly. Returns whether the list
    /// changed.
    pub fn remove(&mut self, id: &str) -> bool {
        let original_len = self.entries.len();
        self.entries.retain(|entry| entry.id() != id);
        self.entries.len() < original_len
    }

    /// Wholesale replacement, as performed by an import.
    pub fn replace(&mut self, entries: Vec<E>) {
        self.entries = entries;
    }

    pub fn entries(&self) -> &[E] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in display order, most recently blocked first.
    pub fn newest_first(&self) -> Vec<E> {
        self.entries.iter().rev().cloned().collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse an exported list. Anything that is not a JSON array of entries
    /// is an error; callers keep their existing list in that case.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

impl<E: Entity> Default for BlockList<E> {
    fn default() -> Self {
        Self::new()
    }
}
