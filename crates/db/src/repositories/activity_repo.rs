//! Repository for the `activity_log` table.

use jupiter_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::{ActivityEntry, NewActivityEntry};

const COLUMNS: &str = "id, project_id, action, performed_by, details, created_at";

/// Provides insert and listing operations for the append-only activity log.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Insert an activity entry.
    pub async fn insert(
        pool: &PgPool,
        input: &NewActivityEntry,
    ) -> Result<ActivityEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_log (project_id, action, performed_by, details)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityEntry>(&query)
            .bind(input.project_id)
            .bind(&input.action)
            .bind(input.performed_by)
            .bind(&input.details)
            .fetch_one(pool)
            .await
    }

    /// A project's most recent activity, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
        limit: i64,
    ) -> Result<Vec<ActivityEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_log
             WHERE project_id = $1
             ORDER BY created_at DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, ActivityEntry>(&query)
            .bind(project_id)
            .bind(limit.clamp(1, 500))
            .fetch_all(pool)
            .await
    }
}
