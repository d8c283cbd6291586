//! Time entry model and DTOs. Entries are append-only.

use jupiter_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A time entry row from the `time_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimeEntry {
    pub id: DbId,
    pub project_id: DbId,
    pub phase_index: i32,
    pub staff_id: DbId,
    pub date: Date,
    pub hours: f64,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

/// A time entry joined with the logging staff member's name, for display.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimeEntryWithStaff {
    pub id: DbId,
    pub project_id: DbId,
    pub phase_index: i32,
    pub staff_id: DbId,
    pub staff_name: String,
    pub date: Date,
    pub hours: f64,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

/// Insert payload for logging time against a phase.
#[derive(Debug, Clone)]
pub struct NewTimeEntry {
    pub project_id: DbId,
    pub phase_index: i32,
    pub staff_id: DbId,
    pub date: Date,
    pub hours: f64,
    pub description: Option<String>,
}
