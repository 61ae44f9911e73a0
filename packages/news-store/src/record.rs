//! News domain record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A news record as stored and served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Record identifier, assigned by the store on create
    pub id: Uuid,
    /// Article author
    pub author: String,
    /// Article title
    pub title: String,
    /// Short summary
    pub summary: String,
    /// Full article content
    pub content: String,
    /// Source URL the article came from
    pub source: String,
    /// Topic tags, at least one
    pub tags: Vec<String>,
    /// Publication timestamp, supplied by the client
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp, maintained by the store
    pub updated_at: DateTime<Utc>,
}
