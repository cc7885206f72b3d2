//! Testing utilities for conversational tracking flows.
//!
//! Provides a `TestHarness` for scripted scenarios against an in-memory
//! session, plus assertion helpers for verifying ledger and journal
//! state.

use crate::catalog::{Catalog, CategoryId, ItemId};
use crate::journal::MemoryLogStore;
use crate::session::{SessionConfig, SessionError, TrackerSession, TurnReply};

/// Scripted harness around a self-contained session.
pub struct TestHarness {
    /// The session under test.
    pub session: TrackerSession<MemoryLogStore>,
}

impl TestHarness {
    /// Harness over the starter catalog.
    pub fn new() -> Self {
        Self {
            session: TrackerSession::in_memory(SessionConfig::new()),
        }
    }

    /// Harness over a custom catalog.
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            session: TrackerSession::new(SessionConfig::new(), catalog, MemoryLogStore::new()),
        }
    }

    /// Submit an utterance, panicking if the session rejects it.
    pub fn say(&mut self, text: &str) -> TurnReply {
        self.session
            .submit(text)
            .unwrap_or_else(|e| panic!("utterance {text:?} was rejected: {e}"))
    }

    /// Submit an utterance, returning the session's verdict.
    pub fn try_say(&mut self, text: &str) -> Result<TurnReply, SessionError> {
        self.session.submit(text)
    }

    /// Resolve (category, item) ids by display names.
    ///
    /// Panics if either name is missing, to keep scenario scripts terse.
    pub fn ids(&self, category: &str, item: &str) -> (CategoryId, ItemId) {
        let category = self
            .session
            .catalog()
            .categories()
            .iter()
            .find(|c| c.name == category)
            .unwrap_or_else(|| panic!("no category named {category:?}"));
        let item = category
            .items
            .iter()
            .find(|i| i.name == item)
            .unwrap_or_else(|| panic!("no item named {item:?} in {:?}", category.name));
        (category.id, item.id)
    }

    /// Number of staged entries.
    pub fn staged_count(&self) -> usize {
        self.session.staged().len()
    }

    /// Number of chat turns recorded so far.
    pub fn turn_count(&self) -> usize {
        self.session.turns().len()
    }

    /// Number of committed records in the journal.
    pub fn committed_count(&self) -> usize {
        self.session.journal().len()
    }

    /// The last assistant reply.
    pub fn last_reply(&self) -> Option<&str> {
        self.session.last_reply()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert that a (category, item) pair is staged with the given value.
#[track_caller]
pub fn assert_staged(harness: &TestHarness, category_id: CategoryId, item_id: ItemId, value: &str) {
    let entry = harness
        .session
        .staged()
        .iter()
        .find(|e| e.category_id == category_id && e.item_id == item_id);
    match entry {
        Some(entry) => assert_eq!(
            entry.value, value,
            "expected staged value {value:?}, got {:?}",
            entry.value
        ),
        None => panic!("expected ({category_id}, {item_id}) to be staged"),
    }
}

/// Assert the ledger holds exactly `count` entries.
#[track_caller]
pub fn assert_staged_count(harness: &TestHarness, count: usize) {
    assert_eq!(
        harness.staged_count(),
        count,
        "expected {count} staged entries, got {}",
        harness.staged_count()
    );
}

/// Assert the ledger is empty.
#[track_caller]
pub fn assert_ledger_empty(harness: &TestHarness) {
    assert!(
        harness.session.staged().is_empty(),
        "expected empty ledger, got {} entries",
        harness.staged_count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_basic_flow() {
        let mut harness = TestHarness::new();
        let reply = harness.say("Track 2000 calories in Nutrition");

        assert!(reply.text.starts_with("I'll track Calories"));
        assert_staged_count(&harness, 1);

        let (nutrition, calories) = harness.ids("Nutrition", "Calories");
        assert_staged(&harness, nutrition, calories, "2000");
    }

    #[test]
    fn test_harness_commit() {
        let mut harness = TestHarness::new();
        harness.say("Track 2000 calories in Nutrition");
        harness.session.commit().unwrap();

        assert_ledger_empty(&harness);
        assert_eq!(harness.committed_count(), 1);
    }

    #[test]
    #[should_panic(expected = "no category named")]
    fn test_ids_panics_on_unknown_category() {
        let harness = TestHarness::new();
        harness.ids("Ghost", "Calories");
    }
}
