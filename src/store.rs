//! In-memory nomination store.
//!
//! The store owns the record collection for the lifetime of the process.
//! Reads (queries, aggregation, lookups) share a read lock; status updates
//! and submissions take the write lock.

use crate::analysis::{self, Insights};
use crate::error::{AwardsError, Result};
use crate::models::{DashboardMetrics, NominationRecord, NominationStatus};
use crate::query::{self, NominationQuery, Page};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct NominationStore {
    records: RwLock<Vec<NominationRecord>>,
}

impl NominationStore {
    pub fn new(records: Vec<NominationRecord>) -> Self {
        info!("Nomination store seeded with {} records", records.len());
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Run `f` against the records under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&[NominationRecord]) -> R) -> R {
        let records = self.records.read();
        f(&records)
    }

    /// Clone of the whole collection in store order.
    pub fn snapshot(&self) -> Vec<NominationRecord> {
        self.records.read().clone()
    }

    pub fn get(&self, id: &str) -> Result<NominationRecord> {
        self.read(|records| records.iter().find(|r| r.id == id).cloned())
            .ok_or_else(|| AwardsError::nomination_not_found(id))
    }

    pub fn query(&self, request: &NominationQuery, now: DateTime<Utc>) -> Result<Page<NominationRecord>> {
        self.read(|records| query::query(records, request, now))
    }

    pub fn metrics(&self, now: DateTime<Utc>) -> DashboardMetrics {
        self.read(|records| analysis::aggregate(records, now))
    }

    pub fn insights(&self) -> Insights {
        self.read(analysis::insights)
    }

    /// Set the status of one nomination and return the updated record.
    pub fn update_status(&self, id: &str, status: NominationStatus) -> Result<NominationRecord> {
        let mut records = self.records.write();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AwardsError::nomination_not_found(id))?;

        debug!("Nomination {}: {} -> {}", id, record.status, status);
        record.status = status;
        Ok(record.clone())
    }

    /// Append a newly submitted nomination.
    pub fn insert(&self, record: NominationRecord) -> Result<()> {
        let mut records = self.records.write();
        if records.iter().any(|r| r.id == record.id) {
            return Err(AwardsError::invalid(format!(
                "nomination {} already exists",
                record.id
            )));
        }
        records.push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{at, record};
    use std::sync::Arc;

    fn store() -> NominationStore {
        NominationStore::new(vec![
            record("n1", "Ann", "HR", at(2024, 1, 1)),
            record("n2", "Ben", "Sales", at(2024, 1, 2)),
        ])
    }

    #[test]
    fn test_update_status() {
        let store = store();
        let updated = store.update_status("n2", NominationStatus::Approved).unwrap();
        assert_eq!(updated.status, NominationStatus::Approved);
        assert_eq!(store.get("n2").unwrap().status, NominationStatus::Approved);
        assert_eq!(store.get("n1").unwrap().status, NominationStatus::Pending);
    }

    #[test]
    fn test_update_unknown_id() {
        let err = store().update_status("missing", NominationStatus::Rejected).unwrap_err();
        assert!(matches!(err, AwardsError::NotFound { .. }));
    }

    #[test]
    fn test_get_unknown_id() {
        assert!(matches!(store().get("nope"), Err(AwardsError::NotFound { .. })));
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let store = store();
        assert!(store.insert(record("n3", "Cat", "HR", at(2024, 1, 3))).is_ok());
        assert_eq!(store.len(), 3);
        assert!(store.insert(record("n3", "Cat", "HR", at(2024, 1, 3))).is_err());
    }

    #[test]
    fn test_concurrent_readers_and_writer() {
        let store = Arc::new(store());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    if i % 2 == 0 {
                        store.update_status("n1", NominationStatus::UnderReview).map(|_| ())
                    } else {
                        store.query(&NominationQuery::default(), at(2024, 2, 1)).map(|p| {
                            assert_eq!(p.total, 2);
                        })
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap().unwrap();
        }
        assert_eq!(store.get("n1").unwrap().status, NominationStatus::UnderReview);
    }
}
