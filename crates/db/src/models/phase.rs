//! Phase entity model and DTOs.
//!
//! Phases are rows keyed `(project_id, phase_index)` rather than an embedded
//! array on the project, so each phase updates atomically and carries its own
//! optimistic-concurrency `version`.

use jupiter_core::progress::PhaseSnapshot;
use jupiter_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A phase row from the `project_phases` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Phase {
    pub project_id: DbId,
    pub phase_index: i32,
    pub name: String,
    pub code: String,
    /// `pending`, `in_progress`, or `completed`.
    pub status: String,
    pub completion: i16,
    pub estimated_hours: f64,
    pub actual_hours: f64,
    pub assigned_staff_id: Option<DbId>,
    pub notes: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    /// Incremented on every update; edits must present the version they read.
    pub version: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Phase {
    /// Status + completion view for progress aggregation. A status string
    /// outside the closed set (impossible under the CHECK constraint) counts
    /// as pending.
    pub fn snapshot(&self) -> PhaseSnapshot {
        let status = self
            .status
            .parse()
            .unwrap_or(jupiter_core::phase::PhaseStatus::Pending);
        PhaseSnapshot::new(status, self.completion)
    }
}

/// Insert payload for one phase at project creation.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPhase {
    pub name: String,
    pub code: String,
    pub estimated_hours: f64,
    pub description: Option<String>,
    pub assigned_staff_id: Option<DbId>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

/// DTO for editing a phase. All fields optional; `expected_version` is the
/// version the caller read and must still match at write time.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePhase {
    pub status: Option<String>,
    pub completion: Option<i16>,
    pub actual_hours: Option<f64>,
    pub assigned_staff_id: Option<DbId>,
    pub notes: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub expected_version: i32,
}
