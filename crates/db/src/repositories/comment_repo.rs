//! Repository for the `comments` table.

use jupiter_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{CommentWithAuthor, NewComment};

/// SELECT column list for comment-with-author queries (aliases the joined
/// profile columns).
const JOINED_COLUMNS: &str = "\
    c.id, c.project_id, c.phase_index, c.file_id, c.comment, c.created_by, \
    p.full_name AS author_name, p.email AS author_email, c.created_at";

/// Provides insert and listing operations for comments. Comments are
/// append-only; there is no update or delete.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a comment and return it joined with its author's name.
    pub async fn create(
        pool: &PgPool,
        input: &NewComment,
    ) -> Result<CommentWithAuthor, sqlx::Error> {
        let query = format!(
            "WITH inserted AS (
                INSERT INTO comments (project_id, phase_index, file_id, comment, created_by)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, project_id, phase_index, file_id, comment, created_by, created_at
             )
             SELECT {JOINED_COLUMNS}
             FROM inserted c
             JOIN profiles p ON p.id = c.created_by"
        );
        sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(input.project_id)
            .bind(input.phase_index)
            .bind(input.file_id)
            .bind(&input.comment)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// List a phase's comments, newest first.
    pub async fn list_for_phase(
        pool: &PgPool,
        project_id: DbId,
        phase_index: i32,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM comments c
             JOIN profiles p ON p.id = c.created_by
             WHERE c.project_id = $1 AND c.phase_index = $2
             ORDER BY c.created_at DESC"
        );
        sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(project_id)
            .bind(phase_index)
            .fetch_all(pool)
            .await
    }

    /// List a file's comments, newest first.
    pub async fn list_for_file(
        pool: &PgPool,
        file_id: DbId,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM comments c
             JOIN profiles p ON p.id = c.created_by
             WHERE c.file_id = $1
             ORDER BY c.created_at DESC"
        );
        sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(file_id)
            .fetch_all(pool)
            .await
    }
}
