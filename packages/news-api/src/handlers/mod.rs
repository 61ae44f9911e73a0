//! HTTP endpoint implementations for the news resource.

mod news_handlers;
mod request_utils;
mod response;

pub use news_handlers::{
    create_news, delete_news_by_id, get_all_news, get_news_by_id, update_news_by_id,
};
pub use request_utils::{AllNewsResponse, NewsRequest, ValidationError};
pub use response::{error_response, success_response, ApiError, ApiResponse, ErrorResponse};
