//! Durable log records and the append-only store interface.
//!
//! The permanent store lives outside the core. Implementations of
//! [`LogStore`] only need to accept records in the order the commit
//! gateway hands them over; `MemoryLogStore` is the in-memory
//! collaborator used by tests and self-contained sessions.

use crate::catalog::{CategoryId, ItemId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for committed log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogRecordId(pub Uuid);

impl LogRecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LogRecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LogRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record as handed to the store, before an identifier is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLogRecord {
    pub category_id: CategoryId,
    pub item_id: ItemId,
    pub value: String,
    /// The commit timestamp; every record of one batch shares it.
    pub timestamp: DateTime<Utc>,
    pub note: Option<String>,
}

/// A committed tracking record. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: LogRecordId,
    pub category_id: CategoryId,
    pub item_id: ItemId,
    pub value: String,
    pub timestamp: DateTime<Utc>,
    pub note: Option<String>,
}

/// Append-only sink for committed records.
pub trait LogStore {
    /// Append one record and return the identifier the store assigned.
    fn append(&mut self, record: NewLogRecord) -> LogRecordId;
}

/// In-memory log store.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogStore {
    records: Vec<LogRecord>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every committed record, oldest first.
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl LogStore for MemoryLogStore {
    fn append(&mut self, record: NewLogRecord) -> LogRecordId {
        let id = LogRecordId::new();
        self.records.push(LogRecord {
            id,
            category_id: record.category_id,
            item_id: record.item_id,
            value: record.value,
            timestamp: record.timestamp,
            note: record.note,
        });
        id
    }
}
