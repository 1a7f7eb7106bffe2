use crate::types::DbId;

/// Domain-level error taxonomy shared by the data and HTTP layers.
///
/// Business-rule outcomes of the sync pipeline (duplicate, quota) are NOT
/// errors -- they are reported per item as [`crate::entry::SyncOutcome`].
/// `CoreError` covers the conditions that abort a request.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
