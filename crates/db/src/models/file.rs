//! Project file metadata model. The blob itself lives in the file store;
//! rows carry the public URL and the storage path needed for deletion.

use jupiter_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A file row from the `project_files` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectFile {
    pub id: DbId,
    pub project_id: DbId,
    pub file_name: String,
    pub file_url: String,
    pub file_size: i64,
    pub file_type: String,
    /// Phase code the file belongs to, if any (e.g. `CD`).
    pub phase_code: Option<String>,
    pub uploaded_by: DbId,
    pub storage_path: String,
    pub is_archived: bool,
    pub created_at: Timestamp,
}

/// Insert payload for a newly stored file.
#[derive(Debug, Clone)]
pub struct NewProjectFile {
    pub project_id: DbId,
    pub file_name: String,
    pub file_url: String,
    pub file_size: i64,
    pub file_type: String,
    pub phase_code: Option<String>,
    pub uploaded_by: DbId,
    pub storage_path: String,
}

/// Filters for the file listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileQuery {
    /// Restrict to one phase code.
    pub phase: Option<String>,
    /// Case-insensitive substring over the file name.
    pub search: Option<String>,
    /// Include archived files (default false).
    #[serde(default)]
    pub include_archived: bool,
}
