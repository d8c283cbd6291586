//! Activity log model. Append-only audit trail of project mutations.

use jupiter_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An activity log row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityEntry {
    pub id: DbId,
    pub project_id: DbId,
    pub action: String,
    pub performed_by: DbId,
    pub details: serde_json::Value,
    pub created_at: Timestamp,
}

/// Insert payload for an activity entry.
#[derive(Debug, Clone)]
pub struct NewActivityEntry {
    pub project_id: DbId,
    pub action: String,
    pub performed_by: DbId,
    pub details: serde_json::Value,
}
