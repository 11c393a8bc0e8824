/// Access-control and mutation services
///
/// The services own the decision logic of the system: they validate the
/// actor against the authorization predicates, enforce the share-list
/// invariants, orchestrate store calls, and return the uniform
/// [`crate::result::ServiceResult`] envelope.
///
/// Each operation is one sequential load → decide → mutate → persist
/// pass; the only suspension points are store calls. There is no
/// in-service concurrency control beyond the store guarantee documented
/// in [`crate::store`].
///
/// # Failure boundary
///
/// Store faults never cross the service boundary. They are logged via
/// `tracing` and surfaced as a generic `OperationFailed` result with an
/// operation-specific message ("Failed to update collection", ...). The
/// one exception is the store's share-cap rejection, which maps to the
/// same `QuotaExceeded` failure the service itself reports.

pub mod collections;
pub mod task_items;

use crate::result::{messages, ServiceError};
use crate::store::StoreError;
use tracing::{error, warn};

/// Maps store failures into service errors at the failure boundary
pub(crate) trait StoreResultExt<T> {
    /// Converts a store failure into a logged, generic service failure
    ///
    /// `failure` is the operation-specific message surfaced to callers.
    fn or_fail(self, failure: &'static str) -> Result<T, ServiceError>;
}

impl<T> StoreResultExt<T> for Result<T, StoreError> {
    fn or_fail(self, failure: &'static str) -> Result<T, ServiceError> {
        self.map_err(|err| match err {
            StoreError::ShareCapExceeded(collection_id) => {
                warn!(%collection_id, "share slot taken by a concurrent writer");
                ServiceError::quota_exceeded(messages::MAX_THREE_USERS)
            }
            err => {
                error!(error = %err, "{failure}");
                ServiceError::operation_failed(failure)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::ErrorKind;
    use uuid::Uuid;

    #[test]
    fn test_database_fault_becomes_operation_failed() {
        let result: Result<(), StoreError> = Err(StoreError::Database(sqlx::Error::PoolClosed));
        let err = result.or_fail(messages::FAILED_GET_COLLECTION).unwrap_err();
        assert_eq!(err.kind, ErrorKind::OperationFailed);
        assert_eq!(err.errors, vec![messages::FAILED_GET_COLLECTION.to_string()]);
    }

    #[test]
    fn test_share_cap_rejection_becomes_quota_exceeded() {
        let result: Result<(), StoreError> = Err(StoreError::ShareCapExceeded(Uuid::new_v4()));
        let err = result.or_fail(messages::FAILED_SHARE_COLLECTION).unwrap_err();
        assert_eq!(err.kind, ErrorKind::QuotaExceeded);
        assert_eq!(err.errors, vec![messages::MAX_THREE_USERS.to_string()]);
    }
}
