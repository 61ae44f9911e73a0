//! Router-level tests for the news endpoints, driven against the
//! in-memory store (the storage trait keeps both backends interchangeable).

use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use uuid::Uuid;

use news_api::config::ApiConfig;
use news_api::router::Router;
use news_store::{MemoryStore, NewsStore, Record, StoreError};

const VALID_BODY: &str = r#"
{
    "author": "code learn",
    "title": "first news",
    "summary": "first news post",
    "content": "news content",
    "created_at": "2024-04-07T05:13:27+00:00",
    "source": "https://example.com",
    "tags": ["politics"]
}"#;

fn test_router() -> Router {
    Router::new(
        Arc::new(MemoryStore::new()),
        Arc::new(ApiConfig::default()),
    )
}

async fn send(router: &Router, method: Method, path: &str, body: &str) -> Response<Bytes> {
    let req = Request::builder()
        .method(method)
        .uri(path)
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap();
    match router.route(req).await {
        Ok(response) => response,
        Err(err) => Response::from(err),
    }
}

fn body_json(response: &Response<Bytes>) -> serde_json::Value {
    serde_json::from_slice(response.body()).unwrap()
}

/// Creates a record through the API and returns its assigned id.
async fn create_sample(router: &Router) -> Uuid {
    let response = send(router, Method::POST, "/news", VALID_BODY).await;
    assert_eq!(response.status(), 201);
    let json = body_json(&response);
    json["data"]["id"].as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn create_returns_created_record() {
    let router = test_router();

    let response = send(&router, Method::POST, "/news", VALID_BODY).await;
    assert_eq!(response.status(), 201);

    let json = body_json(&response);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["author"], "code learn");
    assert_eq!(json["data"]["tags"], serde_json::json!(["politics"]));

    let id: Uuid = json["data"]["id"].as_str().unwrap().parse().unwrap();
    assert_ne!(id, Uuid::nil());

    let response = send(&router, Method::GET, &format!("/news/{}", id), "").await;
    assert_eq!(response.status(), 200);
    assert_eq!(body_json(&response)["data"]["title"], "first news");
}

#[tokio::test]
async fn create_rejects_malformed_json() {
    let router = test_router();
    let response = send(&router, Method::POST, "/news", "{").await;
    assert_eq!(response.status(), 400);
    assert_eq!(body_json(&response)["success"], false);
}

#[tokio::test]
async fn create_reports_every_validation_failure_at_once() {
    let router = test_router();
    let response = send(&router, Method::POST, "/news", "{}").await;
    assert_eq!(response.status(), 400);

    let json = body_json(&response);
    assert_eq!(json["error"]["message"], "validation failed");
    let details = json["error"]["details"].as_str().unwrap();
    for expected in [
        "author is empty",
        "title is empty",
        "content is empty",
        "summary is empty",
        "RFC 3339",
        "source is empty",
        "tags cannot be empty",
    ] {
        assert!(details.contains(expected), "missing '{}' in '{}'", expected, details);
    }
}

#[tokio::test]
async fn get_all_lists_created_records() {
    let router = test_router();
    create_sample(&router).await;
    create_sample(&router).await;

    let response = send(&router, Method::GET, "/news", "").await;
    assert_eq!(response.status(), 200);

    let json = body_json(&response);
    assert_eq!(json["data"]["news"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn get_one_rejects_bad_uuid() {
    let router = test_router();
    let response = send(&router, Method::GET, "/news/not-a-uuid", "").await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn get_one_missing_is_404() {
    let router = test_router();
    let response = send(&router, Method::GET, &format!("/news/{}", Uuid::new_v4()), "").await;
    assert_eq!(response.status(), 404);
    assert_eq!(body_json(&response)["success"], false);
}

#[tokio::test]
async fn update_replaces_record() {
    let router = test_router();
    let id = create_sample(&router).await;

    let updated_body = VALID_BODY.replace("code learn", "another author");
    let response = send(&router, Method::PUT, &format!("/news/{}", id), &updated_body).await;
    assert_eq!(response.status(), 204);
    assert!(response.body().is_empty());

    let response = send(&router, Method::GET, &format!("/news/{}", id), "").await;
    let json = body_json(&response);
    assert_eq!(json["data"]["author"], "another author");
    assert_eq!(json["data"]["id"], id.to_string());
}

#[tokio::test]
async fn update_missing_is_404() {
    let router = test_router();
    let response = send(
        &router,
        Method::PUT,
        &format!("/news/{}", Uuid::new_v4()),
        VALID_BODY,
    )
    .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn update_runs_the_same_validation_as_create() {
    let router = test_router();
    let id = create_sample(&router).await;

    let response = send(&router, Method::PUT, &format!("/news/{}", id), "{}").await;
    assert_eq!(response.status(), 400);
    assert_eq!(body_json(&response)["error"]["message"], "validation failed");
}

#[tokio::test]
async fn delete_is_idempotent() {
    let router = test_router();
    let id = create_sample(&router).await;

    let response = send(&router, Method::DELETE, &format!("/news/{}", id), "").await;
    assert_eq!(response.status(), 204);

    // Deleting the same id again still succeeds.
    let response = send(&router, Method::DELETE, &format!("/news/{}", id), "").await;
    assert_eq!(response.status(), 204);

    let response = send(&router, Method::GET, &format!("/news/{}", id), "").await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn delete_rejects_bad_uuid() {
    let router = test_router();
    let response = send(&router, Method::DELETE, "/news/not-a-uuid", "").await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let router = test_router();
    let response = send(&router, Method::GET, "/nope", "").await;
    assert_eq!(response.status(), 404);
    assert_eq!(body_json(&response)["success"], false);
}

#[tokio::test]
async fn wrong_method_is_405() {
    let router = test_router();
    let response = send(&router, Method::PATCH, "/news", "").await;
    assert_eq!(response.status(), 405);

    let response = send(
        &router,
        Method::POST,
        &format!("/news/{}", Uuid::new_v4()),
        VALID_BODY,
    )
    .await;
    assert_eq!(response.status(), 405);
}

/// Store double whose every operation fails, driving the 500 paths the
/// way the original suite used a mock store.
struct FailingStore;

impl NewsStore for FailingStore {
    fn create(&self, _record: Record) -> Result<Record, StoreError> {
        Err(StoreError::Backend("db error".to_string()))
    }

    fn find_by_id(&self, _id: Uuid) -> Result<Record, StoreError> {
        Err(StoreError::Backend("db error".to_string()))
    }

    fn find_all(&self) -> Result<Vec<Record>, StoreError> {
        Err(StoreError::Backend("db error".to_string()))
    }

    fn update_by_id(&self, _id: Uuid, _record: Record) -> Result<(), StoreError> {
        Err(StoreError::Backend("db error".to_string()))
    }

    fn delete_by_id(&self, _id: Uuid) -> Result<(), StoreError> {
        Err(StoreError::Backend("db error".to_string()))
    }
}

#[tokio::test]
async fn backend_failures_map_to_500() {
    let router = Router::new(Arc::new(FailingStore), Arc::new(ApiConfig::default()));

    let cases = [
        (Method::POST, "/news".to_string(), VALID_BODY),
        (Method::GET, "/news".to_string(), ""),
        (Method::GET, format!("/news/{}", Uuid::new_v4()), ""),
        (Method::PUT, format!("/news/{}", Uuid::new_v4()), VALID_BODY),
        (Method::DELETE, format!("/news/{}", Uuid::new_v4()), ""),
    ];

    for (method, path, body) in cases {
        let response = send(&router, method.clone(), &path, body).await;
        assert_eq!(response.status(), 500, "{} {}", method, path);
        assert_eq!(body_json(&response)["success"], false);
    }
}
