//! The staging → permanent log transition.

use crate::journal::{LogRecordId, LogStore, NewLogRecord};
use crate::ledger::StagingLedger;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors from committing a batch.
#[derive(Debug, Error)]
pub enum CommitError {
    #[error("nothing staged to commit")]
    EmptyBatch,
}

/// Summary of one committed batch.
#[derive(Debug, Clone)]
pub struct CommitReceipt {
    /// Number of records written.
    pub committed: usize,
    /// The single timestamp shared by every record in the batch.
    pub timestamp: DateTime<Utc>,
    /// Store-assigned identifiers, in ledger order.
    pub record_ids: Vec<LogRecordId>,
}

/// Drain the ledger into the store as one batch.
///
/// Every record carries the same commit timestamp, which is what groups a
/// batch in the permanent log. On `EmptyBatch` neither the ledger nor the
/// store is touched; otherwise every staged entry becomes a record and
/// the ledger ends empty.
pub fn commit_staged<S: LogStore>(
    ledger: &mut StagingLedger,
    store: &mut S,
) -> Result<CommitReceipt, CommitError> {
    if ledger.is_empty() {
        return Err(CommitError::EmptyBatch);
    }

    let timestamp = Utc::now();
    let record_ids: Vec<LogRecordId> = ledger
        .drain_all()
        .into_iter()
        .map(|entry| {
            store.append(NewLogRecord {
                category_id: entry.category_id,
                item_id: entry.item_id,
                value: entry.value,
                timestamp,
                note: entry.note,
            })
        })
        .collect();

    Ok(CommitReceipt {
        committed: record_ids.len(),
        timestamp,
        record_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CategoryId, ItemId};
    use crate::journal::MemoryLogStore;

    #[test]
    fn test_empty_batch_touches_nothing() {
        let mut ledger = StagingLedger::new();
        let mut store = MemoryLogStore::new();

        let err = commit_staged(&mut ledger, &mut store).unwrap_err();
        assert!(matches!(err, CommitError::EmptyBatch));
        assert!(store.is_empty());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_commit_drains_in_order_with_one_timestamp() {
        let mut ledger = StagingLedger::new();
        let mut store = MemoryLogStore::new();

        let (c1, i1) = (CategoryId::new(), ItemId::new());
        let (c2, i2) = (CategoryId::new(), ItemId::new());
        ledger.upsert(c1, i1, "2000", None);
        ledger.upsert(c2, i2, "8000", Some("lunch walk".to_string()));

        let receipt = commit_staged(&mut ledger, &mut store).unwrap();

        assert_eq!(receipt.committed, 2);
        assert_eq!(receipt.record_ids.len(), 2);
        assert!(ledger.is_empty());

        let records = store.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].value, "2000");
        assert_eq!(records[1].value, "8000");
        assert_eq!(records[1].note.as_deref(), Some("lunch walk"));
        // Same-commit grouping invariant.
        assert_eq!(records[0].timestamp, records[1].timestamp);
        assert_eq!(records[0].timestamp, receipt.timestamp);
        assert_eq!(records[0].id, receipt.record_ids[0]);
        assert_eq!(records[1].id, receipt.record_ids[1]);
    }

    #[test]
    fn test_second_commit_appends_after_first() {
        let mut ledger = StagingLedger::new();
        let mut store = MemoryLogStore::new();

        ledger.upsert(CategoryId::new(), ItemId::new(), "1", None);
        commit_staged(&mut ledger, &mut store).unwrap();

        ledger.upsert(CategoryId::new(), ItemId::new(), "2", None);
        let receipt = commit_staged(&mut ledger, &mut store).unwrap();

        assert_eq!(receipt.committed, 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[1].value, "2");
    }
}
