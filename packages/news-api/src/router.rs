//! Matchit routing configuration.

use std::sync::Arc;

use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use matchit::Router as MatchitRouter;

use crate::config::ApiConfig;
use crate::handlers;
use news_store::NewsStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend
    pub store: Arc<dyn NewsStore>,
    /// API configuration
    pub config: Arc<ApiConfig>,
}

/// HTTP request router.
pub struct Router {
    inner: MatchitRouter<RouteHandler>,
    state: AppState,
}

impl Router {
    /// Creates a new router with the news routes.
    pub fn new(store: Arc<dyn NewsStore>, config: Arc<ApiConfig>) -> Self {
        let mut router = MatchitRouter::new();

        router
            .insert("/news", RouteHandler::Collection)
            .expect("Failed to insert /news route");
        router
            .insert("/news/{news_id}", RouteHandler::Item)
            .expect("Failed to insert /news/{news_id} route");

        Self {
            inner: router,
            state: AppState { store, config },
        }
    }

    /// Routes an incoming request to the appropriate handler.
    ///
    /// Generic over the body type so tests can drive it with
    /// `http_body_util::Full` while the server passes `hyper`'s incoming
    /// body.
    pub async fn route<B>(&self, req: Request<B>) -> Result<Response<Bytes>, RouterError>
    where
        B: Body + Send,
        B::Data: Send,
        B::Error: std::fmt::Display,
    {
        let path = req.uri().path().to_string();
        tracing::info!(path = %path, method = %req.method(), "request received");

        match self.inner.at(&path) {
            Ok(matched) => {
                let handler = matched.value;
                handler
                    .handle(req, matched.params, self.state.clone())
                    .await
            }
            Err(_) => {
                let error_response = crate::handlers::error_response(
                    404,
                    "Not Found".to_string(),
                    Some(format!("No route found for {}", path)),
                );
                let body = serde_json::to_vec(&error_response).map_err(|e| {
                    RouterError::InternalError(format!("Failed to serialize error response: {}", e))
                })?;
                Ok(Response::builder()
                    .status(404)
                    .header("Content-Type", "application/json")
                    .body(Bytes::from(body))
                    .map_err(|e| {
                        RouterError::InternalError(format!("Failed to build response: {}", e))
                    })?)
            }
        }
    }
}

/// Route handler function.
enum RouteHandler {
    Collection,
    Item,
}

impl RouteHandler {
    /// Handles a request with the given route parameters.
    async fn handle<B>(
        &self,
        req: Request<B>,
        params: matchit::Params<'_, '_>,
        state: AppState,
    ) -> Result<Response<Bytes>, RouterError>
    where
        B: Body + Send,
        B::Data: Send,
        B::Error: std::fmt::Display,
    {
        match self {
            RouteHandler::Collection => {
                if req.method() == hyper::Method::POST {
                    handlers::create_news(req, params, state).await
                } else if req.method() == hyper::Method::GET {
                    handlers::get_all_news(req, params, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
            RouteHandler::Item => {
                if req.method() == hyper::Method::GET {
                    handlers::get_news_by_id(req, params, state).await
                } else if req.method() == hyper::Method::PUT {
                    handlers::update_news_by_id(req, params, state).await
                } else if req.method() == hyper::Method::DELETE {
                    handlers::delete_news_by_id(req, params, state).await
                } else {
                    Err(RouterError::MethodNotAllowed)
                }
            }
        }
    }
}

/// Router error type.
#[derive(Debug)]
pub enum RouterError {
    MethodNotAllowed,
    InternalError(String),
    Timeout,
    BadRequest(String),
    NotFound(String),
}

impl std::fmt::Display for RouterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouterError::MethodNotAllowed => write!(f, "Method Not Allowed"),
            RouterError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
            RouterError::Timeout => write!(f, "Request Timeout"),
            RouterError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            RouterError::NotFound(msg) => write!(f, "Not Found: {}", msg),
        }
    }
}

impl std::error::Error for RouterError {}

impl From<RouterError> for Response<Bytes> {
    fn from(err: RouterError) -> Self {
        let (status, message) = match &err {
            RouterError::MethodNotAllowed => (405, "Method Not Allowed"),
            RouterError::InternalError(msg) => (500, msg.as_str()),
            RouterError::Timeout => (408, "Request Timeout"),
            RouterError::BadRequest(msg) => (400, msg.as_str()),
            RouterError::NotFound(msg) => (404, msg.as_str()),
        };

        let error_response = crate::handlers::error_response(status, message.to_string(), None);
        let body = serde_json::to_vec(&error_response)
            .unwrap_or_else(|e| format!("{{\"success\":false,\"error\":{{\"code\":\"500\",\"message\":\"Failed to serialize error: {}\",\"details\":null}}}}", e).into_bytes());

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Bytes::from(body))
            .unwrap_or_else(|_| {
                Response::builder()
                    .status(500)
                    .body(Bytes::from("Internal Server Error"))
                    .expect("Failed to build fallback error response")
            })
    }
}
