/// Integration tests for the TaskLists API
///
/// These tests drive the full router over the in-memory store:
/// - Collection lifecycle (create → rename → delete)
/// - Sharing rules and the share cap
/// - Task lifecycle under collection access rules
/// - Error statuses (404/403/409/422)

mod common;

use axum::http::StatusCode;
use common::{body_json, create_collection, create_task, empty_request, json_request, TestContext};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.send(empty_request("GET", "/health")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "in-memory");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_create_and_get_collection() {
    let ctx = TestContext::new().await.unwrap();

    let id = create_collection(&ctx, "Groceries", ctx.owner.id).await;

    let response = ctx
        .send(empty_request(
            "GET",
            &format!("/v1/collections/{id}?user_id={}", ctx.owner.id),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["name"], "Groceries");
    assert_eq!(body["owner_id"], ctx.owner.id.to_string());
    assert_eq!(body["shares"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_collection_blank_name_rejected() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .send(json_request(
            "POST",
            "/v1/collections",
            json!({ "name": "", "owner_id": ctx.owner.id }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"][0]["field"], "name");
}

#[tokio::test]
async fn test_get_collection_not_found() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .send(empty_request(
            "GET",
            &format!("/v1/collections/{}?user_id={}", Uuid::new_v4(), ctx.owner.id),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_get_collection_denied_for_stranger() {
    let ctx = TestContext::new().await.unwrap();

    let id = create_collection(&ctx, "Private", ctx.owner.id).await;

    let response = ctx
        .send(empty_request(
            "GET",
            &format!("/v1/collections/{id}?user_id={}", ctx.stranger.id),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_shared_user_can_read_and_rename() {
    let ctx = TestContext::new().await.unwrap();

    let id = create_collection(&ctx, "Team List", ctx.owner.id).await;

    let response = ctx
        .send(json_request(
            "POST",
            &format!("/v1/collections/{id}/share?user_id={}", ctx.owner.id),
            json!({ "user_id": ctx.friend.id }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Shared user can read
    let response = ctx
        .send(empty_request(
            "GET",
            &format!("/v1/collections/{id}?user_id={}", ctx.friend.id),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // And rename
    let response = ctx
        .send(json_request(
            "PUT",
            &format!("/v1/collections/{id}?user_id={}", ctx.friend.id),
            json!({ "name": "Renamed by friend" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["name"], "Renamed by friend");
}

#[tokio::test]
async fn test_share_is_idempotent() {
    let ctx = TestContext::new().await.unwrap();

    let id = create_collection(&ctx, "Team List", ctx.owner.id).await;

    for _ in 0..2 {
        let response = ctx
            .send(json_request(
                "POST",
                &format!("/v1/collections/{id}/share?user_id={}", ctx.owner.id),
                json!({ "user_id": ctx.friend.id }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = ctx
        .send(empty_request(
            "GET",
            &format!("/v1/collections/{id}?user_id={}", ctx.owner.id),
        ))
        .await;
    let body = body_json(response).await;
    assert_eq!(body["shares"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_share_cap_returns_conflict() {
    let ctx = TestContext::new().await.unwrap();

    let id = create_collection(&ctx, "Popular", ctx.owner.id).await;

    for _ in 0..3 {
        let response = ctx
            .send(json_request(
                "POST",
                &format!("/v1/collections/{id}/share?user_id={}", ctx.owner.id),
                json!({ "user_id": Uuid::new_v4() }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    // Fourth user hits the cap
    let response = ctx
        .send(json_request(
            "POST",
            &format!("/v1/collections/{id}/share?user_id={}", ctx.owner.id),
            json!({ "user_id": Uuid::new_v4() }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["error"], "quota_exceeded");
    assert_eq!(body["errors"][0], "Max 3 users allowed");

    // Share list is unchanged
    let response = ctx
        .send(empty_request(
            "GET",
            &format!("/v1/collections/{id}?user_id={}", ctx.owner.id),
        ))
        .await;
    let body = body_json(response).await;
    assert_eq!(body["shares"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_unshare_revokes_access() {
    let ctx = TestContext::new().await.unwrap();

    let id = create_collection(&ctx, "Team List", ctx.owner.id).await;

    ctx.send(json_request(
        "POST",
        &format!("/v1/collections/{id}/share?user_id={}", ctx.owner.id),
        json!({ "user_id": ctx.friend.id }),
    ))
    .await;

    let response = ctx
        .send(empty_request(
            "DELETE",
            &format!(
                "/v1/collections/{id}/share/{}?user_id={}",
                ctx.friend.id, ctx.owner.id
            ),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = ctx
        .send(empty_request(
            "GET",
            &format!("/v1/collections/{id}?user_id={}", ctx.friend.id),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unshare_non_member_is_noop() {
    let ctx = TestContext::new().await.unwrap();

    let id = create_collection(&ctx, "Team List", ctx.owner.id).await;

    let response = ctx
        .send(empty_request(
            "DELETE",
            &format!(
                "/v1/collections/{id}/share/{}?user_id={}",
                ctx.friend.id, ctx.owner.id
            ),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["shares"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_only_owner_can_delete() {
    let ctx = TestContext::new().await.unwrap();

    let id = create_collection(&ctx, "Mine", ctx.owner.id).await;

    ctx.send(json_request(
        "POST",
        &format!("/v1/collections/{id}/share?user_id={}", ctx.owner.id),
        json!({ "user_id": ctx.friend.id }),
    ))
    .await;

    // Shared user cannot delete
    let response = ctx
        .send(empty_request(
            "DELETE",
            &format!("/v1/collections/{id}?user_id={}", ctx.friend.id),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["errors"][0], "Only owner can delete collection");

    // Collection survives
    let response = ctx
        .send(empty_request(
            "GET",
            &format!("/v1/collections/{id}?user_id={}", ctx.owner.id),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Owner can delete
    let response = ctx
        .send(empty_request(
            "DELETE",
            &format!("/v1/collections/{id}?user_id={}", ctx.owner.id),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = ctx
        .send(empty_request(
            "GET",
            &format!("/v1/collections/{id}?user_id={}", ctx.owner.id),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_includes_owned_and_shared() {
    let ctx = TestContext::new().await.unwrap();

    let owned = create_collection(&ctx, "Owned", ctx.owner.id).await;
    let shared = create_collection(&ctx, "Friend's", ctx.friend.id).await;
    create_collection(&ctx, "Unrelated", ctx.stranger.id).await;

    ctx.send(json_request(
        "POST",
        &format!("/v1/collections/{shared}/share?user_id={}", ctx.friend.id),
        json!({ "user_id": ctx.owner.id }),
    ))
    .await;

    let response = ctx
        .send(empty_request(
            "GET",
            &format!("/v1/collections?user_id={}", ctx.owner.id),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let ids: Vec<String> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&owned.to_string()));
    assert!(ids.contains(&shared.to_string()));
}

#[tokio::test]
async fn test_list_pagination() {
    let ctx = TestContext::new().await.unwrap();

    for i in 0..5 {
        create_collection(&ctx, &format!("List {i}"), ctx.owner.id).await;
    }

    let response = ctx
        .send(empty_request(
            "GET",
            &format!("/v1/collections?user_id={}&page=2&page_size=2", ctx.owner.id),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    // Out-of-range page is empty, not an error
    let response = ctx
        .send(empty_request(
            "GET",
            &format!(
                "/v1/collections?user_id={}&page=10&page_size=2",
                ctx.owner.id
            ),
        ))
        .await;
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_task_lifecycle() {
    let ctx = TestContext::new().await.unwrap();

    let collection_id = create_collection(&ctx, "Chores", ctx.owner.id).await;
    let task_id = create_task(&ctx, "Buy milk", collection_id, ctx.owner.id).await;

    // Read it back
    let response = ctx
        .send(empty_request(
            "GET",
            &format!("/v1/tasks/{task_id}?user_id={}", ctx.owner.id),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["title"], "Buy milk");
    assert_eq!(body["is_completed"], false);

    // Update title and completion
    let response = ctx
        .send(json_request(
            "PUT",
            &format!("/v1/tasks/{task_id}?user_id={}", ctx.owner.id),
            json!({ "title": "Buy oat milk", "is_completed": true }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["title"], "Buy oat milk");
    assert_eq!(body["is_completed"], true);

    // Delete
    let response = ctx
        .send(empty_request(
            "DELETE",
            &format!("/v1/tasks/{task_id}?user_id={}", ctx.owner.id),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = ctx
        .send(empty_request(
            "GET",
            &format!("/v1/tasks/{task_id}?user_id={}", ctx.owner.id),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_task_create_in_missing_collection() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .send(json_request(
            "POST",
            &format!("/v1/tasks?user_id={}", ctx.owner.id),
            json!({ "title": "Orphan", "task_collection_id": Uuid::new_v4() }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_task_create_blank_title_rejected() {
    let ctx = TestContext::new().await.unwrap();

    let collection_id = create_collection(&ctx, "Chores", ctx.owner.id).await;

    let response = ctx
        .send(json_request(
            "POST",
            &format!("/v1/tasks?user_id={}", ctx.owner.id),
            json!({ "title": "", "task_collection_id": collection_id }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_shared_user_manages_tasks() {
    let ctx = TestContext::new().await.unwrap();

    let collection_id = create_collection(&ctx, "Team Chores", ctx.owner.id).await;

    ctx.send(json_request(
        "POST",
        &format!(
            "/v1/collections/{collection_id}/share?user_id={}",
            ctx.owner.id
        ),
        json!({ "user_id": ctx.friend.id }),
    ))
    .await;

    // Shared user can create and complete tasks
    let task_id = create_task(&ctx, "Sweep floor", collection_id, ctx.friend.id).await;

    let response = ctx
        .send(json_request(
            "PUT",
            &format!("/v1/tasks/{task_id}?user_id={}", ctx.friend.id),
            json!({ "title": "Sweep floor", "is_completed": true }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Stranger cannot touch them
    let response = ctx
        .send(empty_request(
            "GET",
            &format!("/v1/tasks/{task_id}?user_id={}", ctx.stranger.id),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = ctx
        .send(empty_request(
            "DELETE",
            &format!("/v1/tasks/{task_id}?user_id={}", ctx.stranger.id),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_tasks_by_collection() {
    let ctx = TestContext::new().await.unwrap();

    let collection_id = create_collection(&ctx, "Chores", ctx.owner.id).await;
    create_task(&ctx, "First", collection_id, ctx.owner.id).await;
    create_task(&ctx, "Second", collection_id, ctx.owner.id).await;

    let response = ctx
        .send(empty_request(
            "GET",
            &format!(
                "/v1/tasks/collection/{collection_id}?user_id={}",
                ctx.owner.id
            ),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    // Strangers are rejected
    let response = ctx
        .send(empty_request(
            "GET",
            &format!(
                "/v1/tasks/collection/{collection_id}?user_id={}",
                ctx.stranger.id
            ),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_deleting_collection_removes_tasks() {
    let ctx = TestContext::new().await.unwrap();

    let collection_id = create_collection(&ctx, "Ephemeral", ctx.owner.id).await;
    let task_id = create_task(&ctx, "Doomed", collection_id, ctx.owner.id).await;

    let response = ctx
        .send(empty_request(
            "DELETE",
            &format!("/v1/collections/{collection_id}?user_id={}", ctx.owner.id),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = ctx
        .send(empty_request(
            "GET",
            &format!("/v1/tasks/{task_id}?user_id={}", ctx.owner.id),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
