//! Storage interface and its two implementations.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use uuid::Uuid;

use crate::error::StoreError;
use crate::record::Record;

/// News store operations.
///
/// Both implementations behave identically behind this trait so the API
/// layer can run against either one.
pub trait NewsStore: Send + Sync {
    /// Creates a record, assigning a fresh id. Any client-supplied id is
    /// ignored. Returns the record as stored.
    fn create(&self, record: Record) -> Result<Record, StoreError>;

    /// Finds a record by its id.
    fn find_by_id(&self, id: Uuid) -> Result<Record, StoreError>;

    /// Returns all live records.
    fn find_all(&self) -> Result<Vec<Record>, StoreError>;

    /// Replaces the record with the given id. `NotFound` when no record
    /// was touched.
    fn update_by_id(&self, id: Uuid, record: Record) -> Result<(), StoreError>;

    /// Deletes a record by its id. Deleting an absent id is a success.
    fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
