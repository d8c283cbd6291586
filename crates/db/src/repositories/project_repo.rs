//! Repository for the `projects` table.

use jupiter_core::types::DbId;
use sqlx::PgPool;

use crate::models::phase::NewPhase;
use crate::models::project::{NewProject, Project, ProjectQuery, StatusCount, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, project_number, project_name, project_type, address, client_id, \
    assigned_staff_id, project_manager_id, lead_drafter_id, start_date, \
    deadline, status, current_phase_index, notes, template_used, \
    monday_item_id, created_by, created_at, updated_at";

/// Sort keys the listing endpoint accepts. Anything else falls back to
/// `created_at` rather than reaching the database.
const SORT_KEYS: &[&str] = &[
    "created_at",
    "deadline",
    "project_name",
    "project_number",
    "status",
];

/// Provides CRUD and filtered query operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project together with its phase rows in one transaction.
    ///
    /// Phase rows take their `phase_index` from their position in `phases`.
    pub async fn create(
        pool: &PgPool,
        input: &NewProject,
        phases: &[NewPhase],
    ) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects (project_number, project_name, project_type, address,
                                   client_id, assigned_staff_id, project_manager_id,
                                   lead_drafter_id, start_date, deadline, status, notes,
                                   template_used, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.project_number)
            .bind(&input.project_name)
            .bind(&input.project_type)
            .bind(&input.address)
            .bind(input.client_id)
            .bind(input.assigned_staff_id)
            .bind(input.project_manager_id)
            .bind(input.lead_drafter_id)
            .bind(input.start_date)
            .bind(input.deadline)
            .bind(&input.status)
            .bind(&input.notes)
            .bind(&input.template_used)
            .bind(input.created_by)
            .fetch_one(&mut *tx)
            .await?;

        for (index, phase) in phases.iter().enumerate() {
            sqlx::query(
                "INSERT INTO project_phases (project_id, phase_index, name, code,
                                             estimated_hours, description,
                                             assigned_staff_id, start_date, end_date)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            )
            .bind(project.id)
            .bind(index as i32)
            .bind(&phase.name)
            .bind(&phase.code)
            .bind(phase.estimated_hours)
            .bind(&phase.description)
            .bind(phase.assigned_staff_id)
            .bind(phase.start_date)
            .bind(phase.end_date)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(project)
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The most recently created project belonging to a client. Clients have
    /// a single active project in practice; the newest wins if data drifts.
    pub async fn find_by_client(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE client_id = $1
             ORDER BY created_at DESC LIMIT 1"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(client_id)
            .fetch_optional(pool)
            .await
    }

    /// List projects with optional status/search filters, drafter scoping,
    /// and whitelisted ordering.
    pub async fn list(pool: &PgPool, params: &ProjectQuery) -> Result<Vec<Project>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_idx = 1u32;

        if params.status.is_some() {
            conditions.push(format!("status = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.search.is_some() {
            conditions.push(format!(
                "(project_number ILIKE ${bind_idx} OR project_name ILIKE ${bind_idx} \
                 OR address ILIKE ${bind_idx})"
            ));
            bind_idx += 1;
        }
        if params.assigned_staff_id.is_some() {
            conditions.push(format!("assigned_staff_id = ${bind_idx}"));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sort = params
            .sort
            .as_deref()
            .filter(|key| SORT_KEYS.contains(key))
            .unwrap_or("created_at");
        let direction = match params.direction.as_deref() {
            Some("asc") => "ASC",
            _ => "DESC",
        };

        let query =
            format!("SELECT {COLUMNS} FROM projects {where_clause} ORDER BY {sort} {direction}");

        let mut q = sqlx::query_as::<_, Project>(&query);
        if let Some(ref status) = params.status {
            q = q.bind(status.clone());
        }
        if let Some(ref search) = params.search {
            q = q.bind(format!("%{search}%"));
        }
        if let Some(staff_id) = params.assigned_staff_id {
            q = q.bind(staff_id);
        }
        q.fetch_all(pool).await
    }

    /// Update project header fields. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                project_name = COALESCE($2, project_name),
                project_type = COALESCE($3, project_type),
                address = COALESCE($4, address),
                client_id = COALESCE($5, client_id),
                assigned_staff_id = COALESCE($6, assigned_staff_id),
                project_manager_id = COALESCE($7, project_manager_id),
                lead_drafter_id = COALESCE($8, lead_drafter_id),
                start_date = COALESCE($9, start_date),
                deadline = COALESCE($10, deadline),
                status = COALESCE($11, status),
                notes = COALESCE($12, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.project_name)
            .bind(&input.project_type)
            .bind(&input.address)
            .bind(input.client_id)
            .bind(input.assigned_staff_id)
            .bind(input.project_manager_id)
            .bind(input.lead_drafter_id)
            .bind(input.start_date)
            .bind(input.deadline)
            .bind(&input.status)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a project. Phase, time, comment, file, and activity
    /// rows cascade. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count projects whose number starts with the given prefix, used to
    /// generate the next `PRJ-YYYY-NNN` sequence value.
    pub async fn count_with_number_prefix(
        pool: &PgPool,
        prefix: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM projects WHERE project_number LIKE $1",
        )
        .bind(format!("{prefix}%"))
        .fetch_one(pool)
        .await
    }

    /// Record the external work-management item id after a successful sync.
    pub async fn set_monday_item_id(
        pool: &PgPool,
        id: DbId,
        item_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE projects SET monday_item_id = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(item_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Project counts per status, for the staff dashboard summary tiles.
    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*)::BIGINT AS count FROM projects GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }

    /// Move the project's current-phase pointer.
    pub async fn set_current_phase_index(
        pool: &PgPool,
        id: DbId,
        index: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET current_phase_index = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(index)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
