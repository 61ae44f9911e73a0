//! In-memory news store.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use super::NewsStore;
use crate::error::StoreError;
use crate::record::Record;

/// In-memory store: a single mutex guarding a list of records.
///
/// Lookups are linear scans, which is fine at the sizes this store is
/// meant for (tests and local development).
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Record>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Record>>, StoreError> {
        self.records.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl NewsStore for MemoryStore {
    fn create(&self, mut record: Record) -> Result<Record, StoreError> {
        let mut records = self.lock()?;
        record.id = Uuid::new_v4();
        record.updated_at = Utc::now();
        records.push(record.clone());
        Ok(record)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Record, StoreError> {
        let records = self.lock()?;
        records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn find_all(&self) -> Result<Vec<Record>, StoreError> {
        let records = self.lock()?;
        Ok(records.clone())
    }

    fn update_by_id(&self, id: Uuid, mut record: Record) -> Result<(), StoreError> {
        let mut records = self.lock()?;
        match records.iter_mut().find(|r| r.id == id) {
            Some(slot) => {
                record.id = id;
                record.updated_at = Utc::now();
                *slot = record;
                Ok(())
            }
            None => Err(StoreError::NotFound(id)),
        }
    }

    fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        let mut records = self.lock()?;
        // Idempotent: a missing id leaves the list untouched.
        records.retain(|r| r.id != id);
        Ok(())
    }
}
