//! Handler for a project's activity feed.

use axum::extract::{Path, Query, State};
use axum::Json;
use jupiter_core::types::DbId;
use jupiter_db::models::activity::ActivityEntry;
use jupiter_db::repositories::ActivityRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::handlers::project::find_project;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<i64>,
}

/// GET /api/v1/projects/{id}/activity
///
/// Staff-only, newest first. The activity log is read-only from the API;
/// entries are written as side effects of mutations.
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<DbId>,
    Query(params): Query<ActivityQuery>,
) -> AppResult<Json<Vec<ActivityEntry>>> {
    find_project(&state, id).await?;
    let entries =
        ActivityRepo::list_for_project(&state.pool, id, params.limit.unwrap_or(50)).await?;
    Ok(Json(entries))
}
