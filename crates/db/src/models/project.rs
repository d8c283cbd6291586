//! Project entity model and DTOs.

use jupiter_core::policy::ProjectStakeholders;
use jupiter_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub project_number: String,
    pub project_name: String,
    #[serde(rename = "type")]
    pub project_type: String,
    pub address: String,
    pub client_id: Option<DbId>,
    pub assigned_staff_id: Option<DbId>,
    pub project_manager_id: Option<DbId>,
    pub lead_drafter_id: Option<DbId>,
    pub start_date: Option<Date>,
    pub deadline: Option<Date>,
    pub status: String,
    pub current_phase_index: i32,
    pub notes: Option<String>,
    pub template_used: Option<String>,
    /// Item id in the external work-management tool, set by the sync task.
    pub monday_item_id: Option<String>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// The assignment fields authorization reads.
    pub fn stakeholders(&self) -> ProjectStakeholders {
        ProjectStakeholders {
            client_id: self.client_id,
            assigned_staff_id: self.assigned_staff_id,
            project_manager_id: self.project_manager_id,
            lead_drafter_id: self.lead_drafter_id,
        }
    }
}

/// Insert payload for a new project row (header only; phases are inserted
/// alongside in the same transaction).
#[derive(Debug, Clone)]
pub struct NewProject {
    pub project_number: String,
    pub project_name: String,
    pub project_type: String,
    pub address: String,
    pub client_id: Option<DbId>,
    pub assigned_staff_id: Option<DbId>,
    pub project_manager_id: Option<DbId>,
    pub lead_drafter_id: Option<DbId>,
    pub start_date: Option<Date>,
    pub deadline: Option<Date>,
    pub status: String,
    pub notes: Option<String>,
    pub template_used: Option<String>,
    pub created_by: DbId,
}

/// DTO for updating project header fields. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub project_name: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<String>,
    pub address: Option<String>,
    pub client_id: Option<DbId>,
    pub assigned_staff_id: Option<DbId>,
    pub project_manager_id: Option<DbId>,
    pub lead_drafter_id: Option<DbId>,
    pub start_date: Option<Date>,
    pub deadline: Option<Date>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// One row of the dashboard summary: a status and how many projects hold it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Filter/sort parameters for the project listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectQuery {
    /// Exact status match, e.g. `In Progress`.
    pub status: Option<String>,
    /// Case-insensitive substring over number, name, and address.
    pub search: Option<String>,
    /// Restrict to projects assigned to this staff member (drafter scoping).
    #[serde(skip)]
    pub assigned_staff_id: Option<DbId>,
    /// Sort key; whitelisted in the repository. Defaults to `created_at`.
    pub sort: Option<String>,
    /// `asc` or `desc` (default).
    pub direction: Option<String>,
}
