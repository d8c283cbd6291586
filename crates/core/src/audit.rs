//! Activity log action constants and detail payload builders.
//!
//! This module lives in `core` (zero internal deps) so both the repository
//! layer and any future CLI tooling can name actions consistently. Activity
//! writes are best-effort: a failed insert is logged and never fails the
//! operation that triggered it.

/// Known action names for activity log entries.
pub mod actions {
    pub const PROJECT_CREATED: &str = "project_created";
    pub const PROJECT_UPDATED: &str = "project_updated";
    pub const PHASE_UPDATED: &str = "phase_updated";
    pub const TIME_LOGGED: &str = "time_logged";
    pub const COMMENT_ADDED: &str = "comment_added";
    pub const FILE_UPLOADED: &str = "file_uploaded";
    pub const FILE_ARCHIVED: &str = "file_archived";
    pub const FILE_DELETED: &str = "file_deleted";
}

/// Detail payload for a phase update entry.
pub fn phase_update_details(
    phase_index: i32,
    phase_name: &str,
    status: &str,
    completion: i16,
    actual_hours: f64,
) -> serde_json::Value {
    serde_json::json!({
        "phase_index": phase_index,
        "phase_name": phase_name,
        "changes": {
            "status": status,
            "completion": completion,
            "actual_hours": actual_hours,
        },
    })
}

/// Detail payload for a project creation entry.
pub fn project_created_details(
    project_number: &str,
    template: &str,
    phase_count: usize,
) -> serde_json::Value {
    serde_json::json!({
        "project_number": project_number,
        "template_used": template,
        "phase_count": phase_count,
    })
}

/// Detail payload for a time log entry.
pub fn time_logged_details(phase_index: i32, hours: f64) -> serde_json::Value {
    serde_json::json!({
        "phase_index": phase_index,
        "hours": hours,
    })
}
