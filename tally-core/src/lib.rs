//! Conversational tracking engine.
//!
//! This crate turns free-form utterances like "Track 2000 calories in
//! Nutrition" into staged entries against a user-defined catalog of
//! categories and items, then commits reviewed batches into an
//! append-only log:
//! - Rule-based utterance matching over the dynamic catalog
//! - A staging ledger with in-place conflict resolution
//! - A turn-based conversation with intent classification
//! - An all-or-nothing batch commit into a pluggable log store
//!
//! # Quick Start
//!
//! ```
//! use tally_core::{SessionConfig, TrackerSession};
//!
//! let mut session = TrackerSession::in_memory(SessionConfig::new());
//!
//! let reply = session.submit("Track 2000 calories in Nutrition")?;
//! assert_eq!(
//!     reply.text,
//!     "I'll track Calories as 2000 kcal in Nutrition. Anything else you'd like to track?"
//! );
//!
//! let receipt = session.commit()?;
//! assert_eq!(receipt.committed, 1);
//! # Ok::<(), tally_core::SessionError>(())
//! ```

pub mod catalog;
pub mod commit;
pub mod conversation;
pub mod journal;
pub mod ledger;
pub mod matcher;
pub mod session;
pub mod testing;

// Primary public API
pub use catalog::{sample_catalog, Catalog, Category, CategoryId, ItemId, TrackItem};
pub use commit::{CommitError, CommitReceipt};
pub use conversation::{ChatTurn, ConversationLog, Intent, Sender, TurnId};
pub use journal::{LogRecord, LogRecordId, LogStore, MemoryLogStore, NewLogRecord};
pub use ledger::{LedgerError, PendingEntry, StagingLedger};
pub use matcher::{CandidateMatch, MatchReport};
pub use session::{ConversationState, SessionConfig, SessionError, TrackerSession, TurnReply};
pub use testing::TestHarness;
