//! Repository for the `time_entries` table.

use jupiter_core::types::DbId;
use sqlx::PgPool;

use crate::models::time_entry::{NewTimeEntry, TimeEntry, TimeEntryWithStaff};

const COLUMNS: &str =
    "id, project_id, phase_index, staff_id, date, hours, description, created_at";

/// Provides insert and listing operations for time entries. Entries are
/// immutable once created; there is deliberately no update or delete here.
pub struct TimeEntryRepo;

impl TimeEntryRepo {
    /// Insert a time entry and add its hours to the phase's `actual_hours`
    /// in a single transaction, so the two can never diverge.
    ///
    /// The hours increment is a single atomic UPDATE; it does not bump the
    /// phase `version`, so it cannot invalidate a concurrent field edit.
    pub async fn log(pool: &PgPool, input: &NewTimeEntry) -> Result<TimeEntry, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO time_entries (project_id, phase_index, staff_id, date, hours, description)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let entry = sqlx::query_as::<_, TimeEntry>(&query)
            .bind(input.project_id)
            .bind(input.phase_index)
            .bind(input.staff_id)
            .bind(input.date)
            .bind(input.hours)
            .bind(&input.description)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE project_phases SET actual_hours = actual_hours + $3, updated_at = NOW()
             WHERE project_id = $1 AND phase_index = $2",
        )
        .bind(input.project_id)
        .bind(input.phase_index)
        .bind(input.hours)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(entry)
    }

    /// List a phase's time entries, newest first, with staff names resolved.
    pub async fn list_for_phase(
        pool: &PgPool,
        project_id: DbId,
        phase_index: i32,
    ) -> Result<Vec<TimeEntryWithStaff>, sqlx::Error> {
        sqlx::query_as::<_, TimeEntryWithStaff>(
            "SELECT t.id, t.project_id, t.phase_index, t.staff_id,
                    p.full_name AS staff_name, t.date, t.hours, t.description, t.created_at
             FROM time_entries t
             JOIN profiles p ON p.id = t.staff_id
             WHERE t.project_id = $1 AND t.phase_index = $2
             ORDER BY t.date DESC, t.id DESC",
        )
        .bind(project_id)
        .bind(phase_index)
        .fetch_all(pool)
        .await
    }
}
