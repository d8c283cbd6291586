//! Handlers for phase editing and time logging under
//! `/projects/{id}/phases/{index}`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use jupiter_core::audit::{self, actions};
use jupiter_core::error::CoreError;
use jupiter_core::phase::PhaseStatus;
use jupiter_core::policy;
use jupiter_core::types::{Date, DbId};
use jupiter_core::validate::{validate_completion, validate_logged_hours};
use jupiter_db::models::phase::{Phase, UpdatePhase};
use jupiter_db::models::project::Project;
use jupiter_db::models::time_entry::{NewTimeEntry, TimeEntry, TimeEntryWithStaff};
use jupiter_db::repositories::{PhaseRepo, ProjectRepo, TimeEntryRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::project::find_project;
use crate::handlers::record_activity;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST .../time`.
#[derive(Debug, Deserialize)]
pub struct LogTimeRequest {
    pub date: Date,
    pub hours: f64,
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/{id}/phases
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Phase>>> {
    let project = find_project(&state, id).await?;
    require_view(&user, &project)?;
    let phases = PhaseRepo::list_for_project(&state.pool, id).await?;
    Ok(Json(phases))
}

/// PUT /api/v1/projects/{id}/phases/{index}
///
/// Edit a phase's status, completion, hours, notes, or assignment. The edit
/// must present the phase `version` it read; a stale version returns 409.
/// Setting a phase in progress moves the project's current-phase pointer.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, index)): Path<(DbId, i32)>,
    Json(input): Json<UpdatePhase>,
) -> AppResult<Json<Phase>> {
    let project = find_project(&state, id).await?;
    let phase = find_phase(&state, &project, index).await?;

    if !policy::can_edit_phase(user.actor(), &project.stakeholders(), phase.assigned_staff_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have permission to edit this phase".into(),
        )));
    }

    // Validate before any write.
    if let Some(completion) = input.completion {
        validate_completion(completion).map_err(AppError::Core)?;
    }
    let new_status = match input.status.as_deref() {
        Some(raw) => Some(
            raw.parse::<PhaseStatus>()
                .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?,
        ),
        None => None,
    };
    if let Some(hours) = input.actual_hours {
        if !(hours.is_finite() && hours >= 0.0) {
            return Err(AppError::Core(CoreError::Validation(
                "Actual hours must be a non-negative number".into(),
            )));
        }
    }

    let updated = PhaseRepo::update(&state.pool, id, index, &input)
        .await?
        // The phase exists (fetched above), so an empty update means the
        // version moved underneath us.
        .ok_or(AppError::Core(CoreError::StaleVersion { entity: "Phase" }))?;

    if new_status == Some(PhaseStatus::InProgress) && project.current_phase_index != index {
        ProjectRepo::set_current_phase_index(&state.pool, id, index).await?;
    }

    record_activity(
        &state.pool,
        id,
        actions::PHASE_UPDATED,
        user.profile_id,
        audit::phase_update_details(
            index,
            &updated.name,
            &updated.status,
            updated.completion,
            updated.actual_hours,
        ),
    )
    .await;

    Ok(Json(updated))
}

/// POST /api/v1/projects/{id}/phases/{index}/time
///
/// Log hours worked against a phase. The entry insert and the phase's
/// `actual_hours` increment commit together.
pub async fn log_time(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, index)): Path<(DbId, i32)>,
    Json(input): Json<LogTimeRequest>,
) -> AppResult<(StatusCode, Json<TimeEntry>)> {
    let project = find_project(&state, id).await?;
    let phase = find_phase(&state, &project, index).await?;

    if !policy::can_edit_phase(user.actor(), &project.stakeholders(), phase.assigned_staff_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have permission to log time on this phase".into(),
        )));
    }

    validate_logged_hours(input.hours).map_err(AppError::Core)?;

    let entry = TimeEntryRepo::log(
        &state.pool,
        &NewTimeEntry {
            project_id: id,
            phase_index: index,
            staff_id: user.profile_id,
            date: input.date,
            hours: input.hours,
            description: input.description,
        },
    )
    .await?;

    record_activity(
        &state.pool,
        id,
        actions::TIME_LOGGED,
        user.profile_id,
        audit::time_logged_details(index, input.hours),
    )
    .await;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/projects/{id}/phases/{index}/time
///
/// Staff-only: clients see progress, not the hour ledger.
pub async fn list_time(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path((id, index)): Path<(DbId, i32)>,
) -> AppResult<Json<Vec<TimeEntryWithStaff>>> {
    let project = find_project(&state, id).await?;
    find_phase(&state, &project, index).await?;
    let entries = TimeEntryRepo::list_for_phase(&state.pool, id, index).await?;
    Ok(Json(entries))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) fn require_view(user: &AuthUser, project: &Project) -> AppResult<()> {
    if !policy::can_view_project(user.actor(), &project.stakeholders()) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this project".into(),
        )));
    }
    Ok(())
}

pub(crate) async fn find_phase(
    state: &AppState,
    project: &Project,
    index: i32,
) -> AppResult<Phase> {
    PhaseRepo::find(&state.pool, project.id, index)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Phase",
            id: i64::from(index),
        }))
}
