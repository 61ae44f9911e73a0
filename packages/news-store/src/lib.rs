//! Storage layer for the news API.
//!
//! Provides the news domain record, the storage error taxonomy, and two
//! interchangeable store implementations: SQLite-backed and in-memory.

pub mod error;
pub mod record;
pub mod store;

pub use error::StoreError;
pub use record::Record;
pub use store::{MemoryStore, NewsStore, SqliteStore};
