//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate input, check `jupiter_core::policy`, delegate to the
//! repositories in `jupiter_db`, and map errors via [`crate::error::AppError`].

pub mod activity;
pub mod auth;
pub mod comment;
pub mod dashboard;
pub mod file;
pub mod phase;
pub mod profile;
pub mod project;

use jupiter_db::models::activity::NewActivityEntry;
use jupiter_db::DbPool;
use jupiter_core::types::DbId;

/// Write an activity log entry, logging (but not propagating) failures.
///
/// The activity trail is a non-critical side effect: the triggering mutation
/// has already committed by the time this runs.
pub(crate) async fn record_activity(
    pool: &DbPool,
    project_id: DbId,
    action: &str,
    performed_by: DbId,
    details: serde_json::Value,
) {
    let entry = NewActivityEntry {
        project_id,
        action: action.to_string(),
        performed_by,
        details,
    };
    if let Err(error) = jupiter_db::repositories::ActivityRepo::insert(pool, &entry).await {
        tracing::warn!(project_id, action, %error, "Failed to write activity log entry");
    }
}
