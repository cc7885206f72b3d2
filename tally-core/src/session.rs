//! TrackerSession - the primary public API for conversational tracking.
//!
//! A session owns the catalog, the staging ledger, the conversation
//! history, and the log store it was handed at construction. It is the
//! object a driving surface holds for the lifetime of one conversation;
//! constructing a new session starts a new conversation.

use crate::catalog::{sample_catalog, Catalog};
use crate::commit::{commit_staged, CommitError, CommitReceipt};
use crate::conversation::{
    classify_intent, commit_reply, no_match_reply, tracking_reply, ChatTurn, ConversationLog,
    Intent, Sender, FALLBACK_REPLY, GREETING, HELP_REPLY,
};
use crate::journal::{LogStore, MemoryLogStore};
use crate::ledger::{LedgerError, PendingEntry, StagingLedger};
use crate::matcher::{scan, CandidateMatch};
use thiserror::Error;

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Blank utterance. Nothing is recorded and no state changes.
    #[error("utterance is empty")]
    EmptyInput,

    /// A turn is already being processed; the new utterance is rejected,
    /// never interleaved.
    #[error("a turn is already in flight")]
    Busy,

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Commit(#[from] CommitError),
}

/// Conversation controller states.
///
/// `Processing` is the re-entrancy guard: the matcher reads a catalog
/// snapshot and the ledger is mutated mid-turn, so a second `submit`
/// must not interleave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversationState {
    /// Waiting for user input.
    #[default]
    Idle,
    /// A reply is being computed.
    Processing,
}

/// Configuration for creating a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Assistant turn that opens the conversation, if any.
    pub greeting: Option<String>,
}

impl SessionConfig {
    /// Default configuration: the standard greeting.
    pub fn new() -> Self {
        Self {
            greeting: Some(GREETING.to_string()),
        }
    }

    /// Replace the opening greeting.
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = Some(greeting.into());
        self
    }

    /// Start the conversation without an assistant turn.
    pub fn without_greeting(mut self) -> Self {
        self.greeting = None;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one processed turn.
#[derive(Debug, Clone)]
pub struct TurnReply {
    /// The assistant's reply text, already appended to the history.
    pub text: String,
    /// How the utterance was classified.
    pub intent: Intent,
    /// Candidates staged (or restaged) by this turn, in scan order.
    /// Empty for help and fallback turns, and for tracking turns that
    /// matched nothing.
    pub candidates: Vec<CandidateMatch>,
}

/// A conversational tracking session.
///
/// This is the main entry point. It manages:
/// - the catalog of trackable categories and items
/// - the staging ledger of extracted, not-yet-durable entries
/// - the append-only chat history
/// - the commit transition into the permanent log store
pub struct TrackerSession<S: LogStore> {
    catalog: Catalog,
    ledger: StagingLedger,
    turns: ConversationLog,
    journal: S,
    state: ConversationState,
}

impl TrackerSession<MemoryLogStore> {
    /// Create a self-contained session over the starter catalog and an
    /// in-memory log store.
    pub fn in_memory(config: SessionConfig) -> Self {
        Self::new(config, sample_catalog(), MemoryLogStore::new())
    }
}

impl<S: LogStore> TrackerSession<S> {
    /// Create a session over a catalog and a log store.
    pub fn new(config: SessionConfig, catalog: Catalog, journal: S) -> Self {
        let mut turns = ConversationLog::new();
        if let Some(greeting) = config.greeting {
            turns.push_assistant(greeting);
        }
        Self {
            catalog,
            ledger: StagingLedger::new(),
            turns,
            journal,
            state: ConversationState::Idle,
        }
    }

    /// Process one user utterance and produce the assistant's reply.
    ///
    /// Records the user turn, classifies intent, runs the matcher for
    /// tracking requests (staging every candidate), records the
    /// assistant turn, and returns to `Idle`. The whole transition is
    /// synchronous; the same utterance against the same catalog and
    /// ledger always yields the same candidates and reply text.
    pub fn submit(&mut self, utterance: &str) -> Result<TurnReply, SessionError> {
        if self.state == ConversationState::Processing {
            return Err(SessionError::Busy);
        }
        let utterance = utterance.trim();
        if utterance.is_empty() {
            return Err(SessionError::EmptyInput);
        }

        self.turns.push_user(utterance);
        self.state = ConversationState::Processing;

        let intent = classify_intent(utterance);
        let (text, candidates) = match intent {
            Intent::Tracking => {
                let report = scan(utterance, &self.catalog);
                for candidate in &report.candidates {
                    self.ledger.upsert(
                        candidate.category_id,
                        candidate.item_id,
                        candidate.value.clone(),
                        None,
                    );
                }
                let text = if report.any_found() {
                    tracking_reply(&report.candidates, &self.catalog)
                } else {
                    no_match_reply(&self.catalog)
                };
                (text, report.candidates)
            }
            Intent::Help => (HELP_REPLY.to_string(), Vec::new()),
            Intent::Fallback => (FALLBACK_REPLY.to_string(), Vec::new()),
        };

        self.turns.push_assistant(text.as_str());
        self.state = ConversationState::Idle;

        Ok(TurnReply {
            text,
            intent,
            candidates,
        })
    }

    /// Commit every staged entry as one batch and confirm in the chat.
    ///
    /// All-or-nothing: on success every entry becomes a log record
    /// sharing one timestamp and the ledger ends empty; on `EmptyBatch`
    /// nothing changes and no confirmation turn is recorded.
    pub fn commit(&mut self) -> Result<CommitReceipt, SessionError> {
        let receipt = commit_staged(&mut self.ledger, &mut self.journal)?;
        self.turns.push_assistant(commit_reply(receipt.committed));
        Ok(receipt)
    }

    /// Remove one staged entry by its position in the review list.
    pub fn remove_staged(&mut self, index: usize) -> Result<PendingEntry, SessionError> {
        Ok(self.ledger.remove_at(index)?)
    }

    /// Discard every staged entry.
    pub fn clear_staged(&mut self) {
        self.ledger.clear();
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The full chat history, oldest first.
    pub fn turns(&self) -> &[ChatTurn] {
        self.turns.turns()
    }

    /// The staged entries awaiting review.
    pub fn staged(&self) -> &[PendingEntry] {
        self.ledger.entries()
    }

    /// The catalog the matcher scans against.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Mutable access to the catalog.
    ///
    /// Edits land between turns; the next `submit` scans the current
    /// state. Entries already staged keep their captured ids.
    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    /// The log store committed batches are appended to.
    pub fn journal(&self) -> &S {
        &self.journal
    }

    /// Current controller state.
    pub fn state(&self) -> ConversationState {
        self.state
    }

    /// The last assistant reply, if any.
    pub fn last_reply(&self) -> Option<&str> {
        self.turns
            .turns()
            .iter()
            .rev()
            .find(|t| t.sender == Sender::Assistant)
            .map(|t| t.text.as_str())
    }
}
