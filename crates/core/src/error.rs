//! Domain error taxonomy shared by the repository and API layers.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist (maps to 404).
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed validation before any write occurred (maps to 400).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The operation conflicts with existing state, e.g. a duplicate email
    /// (maps to 409).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// An optimistic-concurrency check failed: the row changed since it was
    /// read (maps to 409). The caller should re-fetch and retry.
    #[error("Stale version for {entity}: the record was modified concurrently")]
    StaleVersion { entity: &'static str },

    /// Missing or invalid credentials (maps to 401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not permitted (maps to 403).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
