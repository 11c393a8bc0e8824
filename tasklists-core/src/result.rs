/// The uniform service result envelope
///
/// Every service operation returns `ServiceResult<T>`: either the value or
/// a [`ServiceError`] carrying one or more human-readable messages. No
/// store fault or panic crosses the service boundary; unexpected failures
/// are logged and surfaced as a generic [`ErrorKind::OperationFailed`].
///
/// The `kind` field lets adapters distinguish failure categories (e.g. to
/// pick an HTTP status) without parsing messages.
///
/// # Example
///
/// ```
/// use tasklists_core::result::{ErrorKind, ServiceError, ServiceResult};
///
/// fn check(allowed: bool) -> ServiceResult<()> {
///     if !allowed {
///         return Err(ServiceError::forbidden("Access denied"));
///     }
///     Ok(())
/// }
///
/// let err = check(false).unwrap_err();
/// assert_eq!(err.kind, ErrorKind::Forbidden);
/// assert_eq!(err.errors, vec!["Access denied".to_string()]);
/// ```

use serde::{Deserialize, Serialize};

/// Result type alias returned by every service operation
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure category for a service error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The referenced entity id does not exist
    NotFound,

    /// The actor failed the authorization predicate
    Forbidden,

    /// The share cap would be exceeded
    QuotaExceeded,

    /// The input violated its contract
    Validation,

    /// An unexpected fault (store or otherwise), logged then surfaced generically
    OperationFailed,
}

impl ErrorKind {
    /// Stable string code for the category
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::QuotaExceeded => "quota_exceeded",
            ErrorKind::Validation => "validation",
            ErrorKind::OperationFailed => "operation_failed",
        }
    }
}

/// A service failure with its category and human-readable messages
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[error("{}", .errors.join("; "))]
pub struct ServiceError {
    /// Failure category
    pub kind: ErrorKind,

    /// One or more human-readable error messages
    pub errors: Vec<String>,
}

impl ServiceError {
    /// Builds an error of the given kind with a single message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            errors: vec![message.into()],
        }
    }

    /// Entity not found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Authorization denied
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Share cap reached
    pub fn quota_exceeded(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::QuotaExceeded, message)
    }

    /// Input contract violated
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Unexpected fault, surfaced generically
    pub fn operation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::OperationFailed, message)
    }
}

/// Human-readable error messages used across the services
pub mod messages {
    pub const COLLECTION_NOT_FOUND: &str = "Collection not found";
    pub const TASK_NOT_FOUND: &str = "Task not found";
    pub const ACCESS_DENIED: &str = "Access denied";
    pub const ONLY_OWNER_CAN_DELETE: &str = "Only owner can delete collection";
    pub const MAX_THREE_USERS: &str = "Max 3 users allowed";

    pub const FAILED_CREATE_COLLECTION: &str = "Failed to create collection";
    pub const FAILED_UPDATE_COLLECTION: &str = "Failed to update collection";
    pub const FAILED_DELETE_COLLECTION: &str = "Failed to delete collection";
    pub const FAILED_GET_COLLECTION: &str = "Failed to get collection";
    pub const FAILED_GET_COLLECTIONS: &str = "Failed to get collections";
    pub const FAILED_SHARE_COLLECTION: &str = "Failed to share collection";
    pub const FAILED_UNSHARE_COLLECTION: &str = "Failed to unshare collection";

    pub const FAILED_CREATE_TASK: &str = "Failed to create task";
    pub const FAILED_UPDATE_TASK: &str = "Failed to update task";
    pub const FAILED_DELETE_TASK: &str = "Failed to delete task";
    pub const FAILED_GET_TASK: &str = "Failed to get task";
    pub const FAILED_GET_TASKS: &str = "Failed to get tasks";
}
