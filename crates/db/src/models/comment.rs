//! Comment model. Comments target a phase or a file and are append-only.

use jupiter_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A comment joined with its author's name and email.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentWithAuthor {
    pub id: DbId,
    pub project_id: DbId,
    pub phase_index: Option<i32>,
    pub file_id: Option<DbId>,
    pub comment: String,
    pub created_by: DbId,
    pub author_name: String,
    pub author_email: String,
    pub created_at: Timestamp,
}

/// Insert payload for a new comment. Exactly one of `phase_index` and
/// `file_id` is set; the database CHECK constraint enforces this.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub project_id: DbId,
    pub phase_index: Option<i32>,
    pub file_id: Option<DbId>,
    pub comment: String,
    pub created_by: DbId,
}
