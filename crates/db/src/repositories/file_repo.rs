//! Repository for the `project_files` table.

use jupiter_core::types::DbId;
use sqlx::PgPool;

use crate::models::file::{FileQuery, NewProjectFile, ProjectFile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, project_id, file_name, file_url, file_size, file_type, phase_code, \
    uploaded_by, storage_path, is_archived, created_at";

/// Provides CRUD operations for project file metadata.
pub struct FileRepo;

impl FileRepo {
    /// Insert a row for a freshly stored file.
    pub async fn create(pool: &PgPool, input: &NewProjectFile) -> Result<ProjectFile, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_files (project_id, file_name, file_url, file_size,
                                        file_type, phase_code, uploaded_by, storage_path)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectFile>(&query)
            .bind(input.project_id)
            .bind(&input.file_name)
            .bind(&input.file_url)
            .bind(input.file_size)
            .bind(&input.file_type)
            .bind(&input.phase_code)
            .bind(input.uploaded_by)
            .bind(&input.storage_path)
            .fetch_one(pool)
            .await
    }

    /// Find a file by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProjectFile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_files WHERE id = $1");
        sqlx::query_as::<_, ProjectFile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's files, newest first. Archived files are excluded
    /// unless requested; optional phase-code and name-substring filters.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
        params: &FileQuery,
    ) -> Result<Vec<ProjectFile>, sqlx::Error> {
        let mut conditions = vec!["project_id = $1".to_string()];
        let mut bind_idx = 2u32;

        if !params.include_archived {
            conditions.push("NOT is_archived".to_string());
        }
        if params.phase.is_some() {
            conditions.push(format!("phase_code = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.search.is_some() {
            conditions.push(format!("file_name ILIKE ${bind_idx}"));
        }

        let query = format!(
            "SELECT {COLUMNS} FROM project_files WHERE {} ORDER BY created_at DESC",
            conditions.join(" AND ")
        );

        let mut q = sqlx::query_as::<_, ProjectFile>(&query).bind(project_id);
        if let Some(ref phase) = params.phase {
            q = q.bind(phase.clone());
        }
        if let Some(ref search) = params.search {
            q = q.bind(format!("%{search}%"));
        }
        q.fetch_all(pool).await
    }

    /// Soft-delete: mark a file archived. Returns `true` if a live row was
    /// flagged.
    pub async fn archive(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE project_files SET is_archived = TRUE WHERE id = $1 AND NOT is_archived")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard-delete a file row. The caller removes the storage object first.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_files WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Storage paths of every file belonging to a project, for cleanup when
    /// the project itself is deleted.
    pub async fn storage_paths_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT storage_path FROM project_files WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }
}
