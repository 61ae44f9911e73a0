//! CRUD operation handlers for the news resource.

use hyper::body::{Body, Bytes};
use hyper::{Request, Response};

use crate::router::{AppState, RouterError};

use super::request_utils::{
    build_empty_response, build_response, build_validation_error_response, map_store_error,
    parse_news_id, read_request_body_with_timeout, AllNewsResponse, MatchitParams, NewsRequest,
};
use super::response::success_response;

/// Creates a news record.
///
/// # Endpoint
/// `POST /news`
///
/// # Request Body
/// ```json
/// {
///   "author": "Batman",
///   "title": "Breaking News",
///   "summary": "A brief summary",
///   "content": "Full content of the article",
///   "source": "https://www.example.com",
///   "tags": ["tag1", "tag2"],
///   "created_at": "2024-04-07T05:13:27+00:00"
/// }
/// ```
///
/// # Response
/// - **201 Created**: Returns the stored record, including the assigned id
///
/// # Errors
/// - **400 Bad Request**: Malformed JSON, or validation failed (the error
///   details list every violation)
/// - **500 Internal Server Error**: Storage backend failure
pub async fn create_news<B>(
    req: Request<B>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError>
where
    B: Body + Send,
    B::Data: Send,
    B::Error: std::fmt::Display,
{
    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;

    let request: NewsRequest = serde_json::from_slice(&body_bytes)
        .map_err(|e| RouterError::BadRequest(format!("Failed to parse request: {}", e)))?;

    let record = match request.validate() {
        Ok(record) => record,
        Err(e) => {
            tracing::error!(error = %e, "request validation failed");
            return build_validation_error_response(&e);
        }
    };

    let created = state.store.create(record).map_err(|e| {
        tracing::error!(error = %e, "error creating news");
        map_store_error(e)
    })?;

    let json = serde_json::to_vec(&success_response(created))
        .map_err(|e| RouterError::InternalError(format!("Failed to serialize response: {}", e)))?;

    build_response(201, json)
}

/// Returns all news records.
///
/// # Endpoint
/// `GET /news`
///
/// # Response
/// - **200 OK**: `{"news": [...]}` inside the success envelope
///
/// # Errors
/// - **500 Internal Server Error**: Storage backend failure
pub async fn get_all_news<B>(
    _req: Request<B>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError>
where
    B: Body + Send,
    B::Data: Send,
    B::Error: std::fmt::Display,
{
    let news = state.store.find_all().map_err(|e| {
        tracing::error!(error = %e, "failed to fetch all news");
        map_store_error(e)
    })?;

    let json = serde_json::to_vec(&success_response(AllNewsResponse { news }))
        .map_err(|e| RouterError::InternalError(format!("Failed to serialize response: {}", e)))?;

    build_response(200, json)
}

/// Returns a single news record.
///
/// # Endpoint
/// `GET /news/{news_id}`
///
/// # Errors
/// - **400 Bad Request**: `news_id` is not a valid UUID
/// - **404 Not Found**: No record with that id
/// - **500 Internal Server Error**: Storage backend failure
pub async fn get_news_by_id<B>(
    _req: Request<B>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError>
where
    B: Body + Send,
    B::Data: Send,
    B::Error: std::fmt::Display,
{
    let news_id = parse_news_id(&params)?;

    let record = state.store.find_by_id(news_id).map_err(|e| {
        tracing::error!(news_id = %news_id, error = %e, "news not found");
        map_store_error(e)
    })?;

    let json = serde_json::to_vec(&success_response(record))
        .map_err(|e| RouterError::InternalError(format!("Failed to serialize response: {}", e)))?;

    build_response(200, json)
}

/// Replaces a news record.
///
/// # Endpoint
/// `PUT /news/{news_id}`
///
/// The path id is authoritative; the body carries the replacement fields
/// and goes through the same validation as create.
///
/// # Response
/// - **204 No Content**: Record replaced
///
/// # Errors
/// - **400 Bad Request**: Bad UUID, malformed JSON, or validation failed
/// - **404 Not Found**: No record with that id
/// - **500 Internal Server Error**: Storage backend failure
pub async fn update_news_by_id<B>(
    req: Request<B>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError>
where
    B: Body + Send,
    B::Data: Send,
    B::Error: std::fmt::Display,
{
    let news_id = parse_news_id(&params)?;

    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;

    let request: NewsRequest = serde_json::from_slice(&body_bytes)
        .map_err(|e| RouterError::BadRequest(format!("Failed to parse request: {}", e)))?;

    let record = match request.validate() {
        Ok(record) => record,
        Err(e) => {
            tracing::error!(error = %e, "request validation failed");
            return build_validation_error_response(&e);
        }
    };

    state.store.update_by_id(news_id, record).map_err(|e| {
        tracing::error!(news_id = %news_id, error = %e, "error updating news");
        map_store_error(e)
    })?;

    build_empty_response(204)
}

/// Deletes a news record.
///
/// # Endpoint
/// `DELETE /news/{news_id}`
///
/// # Response
/// - **204 No Content**: Deleted, or the id was already gone (the store
///   treats delete as idempotent)
///
/// # Errors
/// - **400 Bad Request**: `news_id` is not a valid UUID
/// - **500 Internal Server Error**: Storage backend failure
pub async fn delete_news_by_id<B>(
    _req: Request<B>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError>
where
    B: Body + Send,
    B::Data: Send,
    B::Error: std::fmt::Display,
{
    let news_id = parse_news_id(&params)?;

    state.store.delete_by_id(news_id).map_err(|e| {
        tracing::error!(news_id = %news_id, error = %e, "error deleting news");
        map_store_error(e)
    })?;

    build_empty_response(204)
}
