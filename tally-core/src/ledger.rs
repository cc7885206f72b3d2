//! The staging ledger: extracted entries awaiting commit.
//!
//! Entries are ordered and unique per (category, item) pair. A new match
//! for an already-staged pair replaces its value in place rather than
//! appending a duplicate.

use crate::catalog::{CategoryId, ItemId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("no staged entry at index {index} (ledger holds {len})")]
    OutOfRange { index: usize, len: usize },
}

/// A staged tracking entry, not yet durable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEntry {
    pub category_id: CategoryId,
    pub item_id: ItemId,
    /// The literal captured text, not validated as a number.
    pub value: String,
    pub note: Option<String>,
}

/// Ordered, mutable collection of pending entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StagingLedger {
    entries: Vec<PendingEntry>,
}

impl StagingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a value for a (category, item) pair.
    ///
    /// If the pair is already staged, its value and note are replaced in
    /// place and its position in the order is preserved; otherwise a new
    /// entry is appended at the end. Returns true when an existing entry
    /// was updated.
    pub fn upsert(
        &mut self,
        category_id: CategoryId,
        item_id: ItemId,
        value: impl Into<String>,
        note: Option<String>,
    ) -> bool {
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|e| e.category_id == category_id && e.item_id == item_id)
        {
            Some(existing) => {
                existing.value = value;
                existing.note = note;
                true
            }
            None => {
                self.entries.push(PendingEntry {
                    category_id,
                    item_id,
                    value,
                    note,
                });
                false
            }
        }
    }

    /// Remove the entry at a position in the review list.
    pub fn remove_at(&mut self, index: usize) -> Result<PendingEntry, LedgerError> {
        if index >= self.entries.len() {
            return Err(LedgerError::OutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Hand over every entry in order, leaving the ledger empty, as a
    /// single observable step.
    pub fn drain_all(&mut self) -> Vec<PendingEntry> {
        std::mem::take(&mut self.entries)
    }

    /// Discard every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The staged entries in review order.
    pub fn entries(&self) -> &[PendingEntry] {
        &self.entries
    }
}
