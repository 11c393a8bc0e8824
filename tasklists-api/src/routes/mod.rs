/// HTTP route handlers
///
/// Handlers are thin adapters: they validate request bodies, extract
/// the acting user from the `user_id` query parameter, call into the
/// services, and map `ServiceError` kinds onto HTTP statuses via
/// [`crate::error::ApiError`].

use serde::Deserialize;
use uuid::Uuid;

pub mod collections;
pub mod health;
pub mod tasks;

/// Identifies the acting user on authorized endpoints
///
/// The service has no authentication layer; every protected route
/// takes the caller's id as a `user_id` query parameter and the
/// services decide what that user may do.
#[derive(Debug, Deserialize)]
pub struct ActorQuery {
    /// Id of the user performing the request
    pub user_id: Uuid,
}
