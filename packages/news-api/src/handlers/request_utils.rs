//! Request utilities: body reading, id parsing, validation, and error
//! mapping for the news endpoints.

use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, Uri};
use serde::{Deserialize, Serialize};
use tokio::time;
use uuid::Uuid;

use super::response::error_response;
use crate::router::RouterError;
use news_store::{Record, StoreError};

/// Type alias for matchit parameters with explicit lifetimes
pub type MatchitParams<'a, 'b> = matchit::Params<'a, 'b>;

/// Helper function to read request body with timeout
pub async fn read_request_body_with_timeout<B>(
    req: Request<B>,
    timeout_ms: u64,
) -> Result<Bytes, RouterError>
where
    B: Body + Send,
    B::Data: Send,
    B::Error: std::fmt::Display,
{
    let timeout_duration = time::Duration::from_millis(timeout_ms);
    let body = time::timeout(timeout_duration, req.collect())
        .await
        .map_err(|_| RouterError::Timeout)?
        .map_err(|e| RouterError::InternalError(format!("Failed to read request body: {}", e)))?;
    Ok(body.to_bytes())
}

/// Parses the `news_id` path parameter as a UUID.
pub fn parse_news_id(params: &MatchitParams<'_, '_>) -> Result<Uuid, RouterError> {
    let raw = params.get("news_id").unwrap_or_default();
    Uuid::parse_str(raw)
        .map_err(|e| RouterError::BadRequest(format!("Invalid news id '{}': {}", raw, e)))
}

/// Map StoreError to the matching RouterError via its HTTP status.
pub fn map_store_error(e: StoreError) -> RouterError {
    match e.http_status() {
        404 => RouterError::NotFound(e.to_string()),
        400 => RouterError::BadRequest(e.to_string()),
        _ => RouterError::InternalError(e.to_string()),
    }
}

/// Helper to build HTTP response with proper error handling
pub fn build_response(status: u16, json: Vec<u8>) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Bytes::from(json))
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}

/// Helper to build empty HTTP response (for 204 No Content)
pub fn build_empty_response(status: u16) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .body(Bytes::new())
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}

/// Builds the 400 response for a failed validation, with every violation
/// in the error details.
pub fn build_validation_error_response(
    err: &ValidationError,
) -> Result<Response<Bytes>, RouterError> {
    let body = serde_json::to_vec(&error_response(
        400,
        "validation failed".to_string(),
        Some(err.to_string()),
    ))
    .map_err(|e| RouterError::InternalError(format!("Failed to serialize response: {}", e)))?;
    build_response(400, body)
}

/// Request body for creating or updating a news record.
///
/// Every field defaults so a missing field reads as empty and gets
/// reported by [`NewsRequest::validate`] instead of failing the parse.
#[derive(Debug, Default, Deserialize)]
pub struct NewsRequest {
    /// Article author
    #[serde(default)]
    pub author: String,
    /// Article title
    #[serde(default)]
    pub title: String,
    /// Short summary
    #[serde(default)]
    pub summary: String,
    /// Full article content
    #[serde(default)]
    pub content: String,
    /// Source URL
    #[serde(default)]
    pub source: String,
    /// Topic tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Publication timestamp, RFC 3339
    #[serde(default)]
    pub created_at: String,
}

/// Aggregate validation failure: every violation, not just the first.
#[derive(Debug)]
pub struct ValidationError {
    violations: Vec<String>,
}

impl ValidationError {
    /// The individual violations, in field order.
    pub fn violations(&self) -> &[String] {
        &self.violations
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.violations.join("; "))
    }
}

impl std::error::Error for ValidationError {}

impl NewsRequest {
    /// Validates the request field by field, collecting every violation,
    /// and builds the domain record on success.
    ///
    /// The record id is left nil; the store assigns it on create and the
    /// path parameter supplies it on update.
    pub fn validate(self) -> Result<Record, ValidationError> {
        let mut violations = Vec::new();

        if self.author.is_empty() {
            violations.push("author is empty".to_string());
        }
        if self.title.is_empty() {
            violations.push("title is empty".to_string());
        }
        if self.content.is_empty() {
            violations.push("content is empty".to_string());
        }
        if self.summary.is_empty() {
            violations.push("summary is empty".to_string());
        }

        let created_at = match DateTime::parse_from_rfc3339(&self.created_at) {
            Ok(t) => Some(t.with_timezone(&Utc)),
            Err(e) => {
                violations.push(format!(
                    "created_at '{}' is not a valid RFC 3339 timestamp: {}",
                    self.created_at, e
                ));
                None
            }
        };

        if self.source.is_empty() {
            violations.push("source is empty".to_string());
        } else if let Err(e) = self.source.parse::<Uri>() {
            violations.push(format!("source '{}' is not a valid url: {}", self.source, e));
        }

        if self.tags.is_empty() {
            violations.push("tags cannot be empty".to_string());
        }

        match created_at {
            Some(created_at) if violations.is_empty() => Ok(Record {
                id: Uuid::nil(),
                author: self.author,
                title: self.title,
                summary: self.summary,
                content: self.content,
                source: self.source,
                tags: self.tags,
                created_at,
                updated_at: created_at,
            }),
            _ => Err(ValidationError { violations }),
        }
    }
}

/// Response body for the get-all endpoint.
#[derive(Debug, Serialize)]
pub struct AllNewsResponse {
    /// Every live record
    pub news: Vec<Record>,
}
