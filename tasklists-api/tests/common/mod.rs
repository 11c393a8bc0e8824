/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - An app instance over the in-memory store (no external services)
/// - Pre-created test users
/// - Request/response helpers

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use serde_json::json;
use tasklists_api::app::{build_router, AppState};
use tasklists_api::config::Config;
use tasklists_core::models::user::User;
use tower::Service as _;
use uuid::Uuid;

/// Test context containing the app and a few known users
pub struct TestContext {
    pub app: Router,
    pub owner: User,
    pub friend: User,
    pub stranger: User,
}

impl TestContext {
    /// Creates a new test context over a fresh in-memory store
    pub async fn new() -> anyhow::Result<Self> {
        let state = AppState::in_memory(Config::for_tests());

        let owner = User {
            id: Uuid::new_v4(),
            name: "Owner".to_string(),
        };
        let friend = User {
            id: Uuid::new_v4(),
            name: "Friend".to_string(),
        };
        let stranger = User {
            id: Uuid::new_v4(),
            name: "Stranger".to_string(),
        };
        for user in [&owner, &friend, &stranger] {
            state.users.add(user).await?;
        }

        let app = build_router(state);

        Ok(Self {
            app,
            owner,
            friend,
            stranger,
        })
    }

    /// Sends a request and returns the raw response
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().call(request).await.unwrap()
    }
}

/// Builds a JSON request
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Builds a bodyless request
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Reads a response body as JSON
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Creates a collection through the API and returns its id
pub async fn create_collection(ctx: &TestContext, name: &str, owner_id: Uuid) -> Uuid {
    let response = ctx
        .send(json_request(
            "POST",
            "/v1/collections",
            json!({ "name": name, "owner_id": owner_id }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    body["id"].as_str().unwrap().parse().unwrap()
}

/// Creates a task through the API and returns its id
pub async fn create_task(
    ctx: &TestContext,
    title: &str,
    collection_id: Uuid,
    actor_id: Uuid,
) -> Uuid {
    let response = ctx
        .send(json_request(
            "POST",
            &format!("/v1/tasks?user_id={actor_id}"),
            json!({ "title": title, "task_collection_id": collection_id }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    body["id"].as_str().unwrap().parse().unwrap()
}
