/// Task item endpoints
///
/// Tasks live inside a collection and inherit its access rules: any
/// user who can see the parent collection can create, read, update and
/// delete its tasks.
///
/// # Endpoints
///
/// - `POST   /v1/tasks` - Create task
/// - `GET    /v1/tasks/:id` - Get task
/// - `PUT    /v1/tasks/:id` - Update title/completion
/// - `DELETE /v1/tasks/:id` - Delete task
/// - `GET    /v1/tasks/collection/:collection_id` - List tasks in a collection

use crate::{app::AppState, error::ApiResult, routes::ActorQuery};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tasklists_core::models::task_item::TaskItem;
use uuid::Uuid;
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Id of the collection the task belongs to
    pub task_collection_id: Uuid,
}

/// Update task request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// New task title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// New completion state
    pub is_completed: bool,
}

/// Create a task in a collection
///
/// # Endpoint
///
/// ```text
/// POST /v1/tasks?user_id=<uuid>
/// Content-Type: application/json
///
/// {
///   "title": "Buy milk",
///   "task_collection_id": "uuid"
/// }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: Parent collection does not exist
/// - `403 Forbidden`: Caller has no access to the parent collection
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create(
    State(state): State<AppState>,
    Query(actor): Query<ActorQuery>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskItem>)> {
    req.validate()?;

    let task = state
        .tasks
        .create(&req.title, req.task_collection_id, actor.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Get a task by id
///
/// # Errors
///
/// - `404 Not Found`: No such task
/// - `403 Forbidden`: Caller has no access to the parent collection
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(actor): Query<ActorQuery>,
) -> ApiResult<Json<TaskItem>> {
    let task = state.tasks.get_by_id(id, actor.user_id).await?;
    Ok(Json(task))
}

/// Update a task's title and completion state
///
/// # Endpoint
///
/// ```text
/// PUT /v1/tasks/:id?user_id=<uuid>
/// Content-Type: application/json
///
/// {
///   "title": "Buy oat milk",
///   "is_completed": true
/// }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No such task
/// - `403 Forbidden`: Caller has no access to the parent collection
/// - `422 Unprocessable Entity`: Validation failed
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(actor): Query<ActorQuery>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskItem>> {
    req.validate()?;

    let task = state
        .tasks
        .update(id, actor.user_id, &req.title, req.is_completed)
        .await?;
    Ok(Json(task))
}

/// Delete a task
///
/// # Errors
///
/// - `404 Not Found`: No such task
/// - `403 Forbidden`: Caller has no access to the parent collection
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(actor): Query<ActorQuery>,
) -> ApiResult<StatusCode> {
    state.tasks.delete(id, actor.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List all tasks in a collection
///
/// Tasks are returned oldest first.
///
/// # Errors
///
/// - `404 Not Found`: No such collection
/// - `403 Forbidden`: Caller has no access to the collection
pub async fn list_by_collection(
    State(state): State<AppState>,
    Path(collection_id): Path<Uuid>,
    Query(actor): Query<ActorQuery>,
) -> ApiResult<Json<Vec<TaskItem>>> {
    let tasks = state
        .tasks
        .list_by_collection(collection_id, actor.user_id)
        .await?;
    Ok(Json(tasks))
}
