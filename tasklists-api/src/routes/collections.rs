/// Task collection endpoints
///
/// CRUD plus sharing operations on task collections. Every endpoint
/// except creation takes the acting user as a `user_id` query
/// parameter; the collection service enforces who may read, rename,
/// delete, share and unshare.
///
/// # Endpoints
///
/// - `POST   /v1/collections` - Create collection
/// - `GET    /v1/collections` - List collections visible to a user
/// - `GET    /v1/collections/:id` - Get collection
/// - `PUT    /v1/collections/:id` - Rename collection
/// - `DELETE /v1/collections/:id` - Delete collection (owner only)
/// - `POST   /v1/collections/:id/share` - Share with another user
/// - `DELETE /v1/collections/:id/share/:share_user_id` - Remove a share

use crate::{app::AppState, error::ApiResult, routes::ActorQuery};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tasklists_core::models::collection::TaskCollection;
use uuid::Uuid;
use validator::Validate;

/// Create collection request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCollectionRequest {
    /// Collection name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Id of the owning user
    pub owner_id: Uuid,
}

/// Rename collection request
#[derive(Debug, Deserialize, Validate)]
pub struct RenameCollectionRequest {
    /// New collection name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
}

/// Share collection request
#[derive(Debug, Deserialize)]
pub struct ShareRequest {
    /// Id of the user to grant access to
    pub user_id: Uuid,
}

/// Paged listing query
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Id of the user whose visible collections to list
    pub user_id: Uuid,

    /// 1-based page number (defaults to 1)
    pub page: Option<i64>,

    /// Page size (defaults to 20)
    pub page_size: Option<i64>,
}

/// Create a collection
///
/// # Endpoint
///
/// ```text
/// POST /v1/collections
/// Content-Type: application/json
///
/// {
///   "name": "Groceries",
///   "owner_id": "uuid"
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
/// - `500 Internal Server Error`: Store failure
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateCollectionRequest>,
) -> ApiResult<(StatusCode, Json<TaskCollection>)> {
    req.validate()?;

    let collection = state.collections.create(&req.name, req.owner_id).await?;
    Ok((StatusCode::CREATED, Json(collection)))
}

/// List collections visible to a user
///
/// Returns owned and shared collections, newest first, paged.
///
/// # Endpoint
///
/// ```text
/// GET /v1/collections?user_id=<uuid>&page=1&page_size=20
/// ```
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<TaskCollection>>> {
    let collections = state
        .collections
        .list_for_user(
            query.user_id,
            query.page.unwrap_or(0),
            query.page_size.unwrap_or(0),
        )
        .await?;
    Ok(Json(collections))
}

/// Get a collection by id
///
/// # Errors
///
/// - `404 Not Found`: No such collection
/// - `403 Forbidden`: Caller is neither owner nor shared user
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(actor): Query<ActorQuery>,
) -> ApiResult<Json<TaskCollection>> {
    let collection = state.collections.get_by_id(id, actor.user_id).await?;
    Ok(Json(collection))
}

/// Rename a collection
///
/// Both the owner and shared users may rename.
///
/// # Endpoint
///
/// ```text
/// PUT /v1/collections/:id?user_id=<uuid>
/// Content-Type: application/json
///
/// { "name": "New name" }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No such collection
/// - `403 Forbidden`: Caller has no access
/// - `422 Unprocessable Entity`: Validation failed
pub async fn rename(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(actor): Query<ActorQuery>,
    Json(req): Json<RenameCollectionRequest>,
) -> ApiResult<Json<TaskCollection>> {
    req.validate()?;

    let collection = state
        .collections
        .rename(id, actor.user_id, &req.name)
        .await?;
    Ok(Json(collection))
}

/// Delete a collection
///
/// Only the owner may delete; shared users get `403`.
///
/// # Errors
///
/// - `404 Not Found`: No such collection
/// - `403 Forbidden`: Caller is not the owner
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(actor): Query<ActorQuery>,
) -> ApiResult<StatusCode> {
    state.collections.delete(id, actor.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Share a collection with another user
///
/// Idempotent below the cap: sharing with a user who already has
/// access leaves the share list unchanged. A collection holds at most
/// three shared users.
///
/// # Endpoint
///
/// ```text
/// POST /v1/collections/:id/share?user_id=<actor>
/// Content-Type: application/json
///
/// { "user_id": "<target uuid>" }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No such collection
/// - `403 Forbidden`: Caller has no access
/// - `409 Conflict`: Share cap reached
pub async fn share(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(actor): Query<ActorQuery>,
    Json(req): Json<ShareRequest>,
) -> ApiResult<Json<TaskCollection>> {
    let collection = state
        .collections
        .share(id, actor.user_id, req.user_id)
        .await?;
    Ok(Json(collection))
}

/// Remove a user from a collection's share list
///
/// Removing a user who is not on the list is a no-op.
///
/// # Errors
///
/// - `404 Not Found`: No such collection
/// - `403 Forbidden`: Caller has no access
pub async fn unshare(
    State(state): State<AppState>,
    Path((id, share_user_id)): Path<(Uuid, Uuid)>,
    Query(actor): Query<ActorQuery>,
) -> ApiResult<Json<TaskCollection>> {
    let collection = state
        .collections
        .unshare(id, actor.user_id, share_user_id)
        .await?;
    Ok(Json(collection))
}
