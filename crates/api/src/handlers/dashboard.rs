//! Dashboard handlers: the client project view and the staff summary tiles.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use jupiter_core::error::CoreError;
use jupiter_core::progress::{self, PhaseSnapshot, PhaseStatusCounts};
use jupiter_db::models::phase::Phase;
use jupiter_db::models::project::{Project, StatusCount};
use jupiter_db::repositories::{PhaseRepo, ProjectRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

/// Response for `GET /dashboard`: the client's single project with derived
/// figures, or `project: null` while nothing is assigned yet.
#[derive(Debug, Serialize)]
pub struct ClientDashboard {
    pub project: Option<ClientProjectSummary>,
}

#[derive(Debug, Serialize)]
pub struct ClientProjectSummary {
    #[serde(flatten)]
    pub project: Project,
    pub phases: Vec<Phase>,
    /// Completion-weighted overall progress, 0-100.
    pub progress: u8,
    pub phase_counts: PhaseStatusCounts,
    /// Name of the phase the project is currently in, if any.
    pub current_phase: Option<String>,
    /// Whole days until the deadline; negative when overdue. `None` while
    /// no deadline is set.
    pub days_until_deadline: Option<i64>,
}

/// GET /api/v1/dashboard
///
/// Client-facing: resolves the caller's project and its derived progress
/// figures. Staff use the project listing and `/dashboard/summary` instead.
pub async fn client_dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ClientDashboard>> {
    if user.role.is_staff() {
        return Err(AppError::Core(CoreError::Forbidden(
            "The client dashboard is only available to client accounts".into(),
        )));
    }

    let Some(project) = ProjectRepo::find_by_client(&state.pool, user.profile_id).await? else {
        return Ok(Json(ClientDashboard { project: None }));
    };

    let phases = PhaseRepo::list_for_project(&state.pool, project.id).await?;
    let snapshots: Vec<PhaseSnapshot> = phases.iter().map(Phase::snapshot).collect();

    let today = Utc::now().date_naive();
    let summary = ClientProjectSummary {
        progress: progress::project_progress(&snapshots),
        phase_counts: progress::phase_status_counts(&snapshots),
        current_phase: progress::current_phase(&phases, project.current_phase_index)
            .map(|phase| phase.name.clone()),
        days_until_deadline: project
            .deadline
            .map(|deadline| progress::days_until_deadline(deadline, today)),
        phases,
        project,
    };

    Ok(Json(ClientDashboard {
        project: Some(summary),
    }))
}

/// GET /api/v1/dashboard/summary
///
/// Staff summary tiles: project counts per status.
pub async fn staff_summary(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
) -> AppResult<Json<Vec<StatusCount>>> {
    let counts = ProjectRepo::count_by_status(&state.pool).await?;
    Ok(Json(counts))
}
