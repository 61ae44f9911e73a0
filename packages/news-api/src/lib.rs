//! REST API for the news service.
//!
//! Routes JSON-over-HTTP requests to a [`news_store::NewsStore`], turning
//! validation and storage failures into HTTP status codes.

pub mod config;
pub mod handlers;
pub mod router;
pub mod server;
