//! Repository for the `project_phases` table.
//!
//! Updates are guarded by the row's `version` counter: a write that presents
//! a stale version affects zero rows, which callers surface as a 409 rather
//! than silently clobbering a concurrent edit.

use jupiter_core::types::DbId;
use sqlx::PgPool;

use crate::models::phase::{Phase, UpdatePhase};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    project_id, phase_index, name, code, status, completion, estimated_hours, \
    actual_hours, assigned_staff_id, notes, description, start_date, end_date, \
    version, created_at, updated_at";

/// Provides query and update operations for phases.
pub struct PhaseRepo;

impl PhaseRepo {
    /// All phases of a project in workflow order.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Phase>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_phases WHERE project_id = $1 ORDER BY phase_index"
        );
        sqlx::query_as::<_, Phase>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Find one phase by its position within a project.
    pub async fn find(
        pool: &PgPool,
        project_id: DbId,
        phase_index: i32,
    ) -> Result<Option<Phase>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM project_phases WHERE project_id = $1 AND phase_index = $2");
        sqlx::query_as::<_, Phase>(&query)
            .bind(project_id)
            .bind(phase_index)
            .fetch_optional(pool)
            .await
    }

    /// Apply a phase edit if and only if the stored `version` still matches
    /// `input.expected_version`. Only non-`None` fields are applied; the
    /// version is incremented on success.
    ///
    /// Returns `None` when nothing was updated -- either the phase does not
    /// exist or the version was stale. Callers that already fetched the
    /// phase can attribute `None` to a stale version.
    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        phase_index: i32,
        input: &UpdatePhase,
    ) -> Result<Option<Phase>, sqlx::Error> {
        let query = format!(
            "UPDATE project_phases SET
                status = COALESCE($4, status),
                completion = COALESCE($5, completion),
                actual_hours = COALESCE($6, actual_hours),
                assigned_staff_id = COALESCE($7, assigned_staff_id),
                notes = COALESCE($8, notes),
                description = COALESCE($9, description),
                start_date = COALESCE($10, start_date),
                end_date = COALESCE($11, end_date),
                version = version + 1,
                updated_at = NOW()
             WHERE project_id = $1 AND phase_index = $2 AND version = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Phase>(&query)
            .bind(project_id)
            .bind(phase_index)
            .bind(input.expected_version)
            .bind(&input.status)
            .bind(input.completion)
            .bind(input.actual_hours)
            .bind(input.assigned_staff_id)
            .bind(&input.notes)
            .bind(&input.description)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_optional(pool)
            .await
    }
}
