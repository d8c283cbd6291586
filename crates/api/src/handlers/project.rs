//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Datelike, Utc};
use jupiter_core::audit::{self, actions};
use jupiter_core::error::CoreError;
use jupiter_core::phase::PhaseTemplate;
use jupiter_core::policy;
use jupiter_core::progress::{self, PhaseSnapshot};
use jupiter_core::project::ProjectStatus;
use jupiter_core::roles::Role;
use jupiter_core::types::{Date, DbId};
use jupiter_core::validate::validate_date_range;
use jupiter_db::models::phase::{NewPhase, Phase};
use jupiter_db::models::profile::CreateProfile;
use jupiter_db::models::project::{NewProject, Project, ProjectQuery, UpdateProject};
use jupiter_db::repositories::{FileRepo, PhaseRepo, ProfileRepo, ProjectRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::record_activity;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireManager, RequireStaff};
use crate::state::AppState;
use crate::sync::{spawn_project_sync, WorkflowItemPayload};

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// The client a new project belongs to: an existing profile, or a new
/// client to be looked up (and created if absent) by email.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ClientSelection {
    Existing { client_id: DbId },
    New { full_name: String, email: String },
}

/// Request body for `POST /projects`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, message = "Project name is required"))]
    pub project_name: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Project type is required"))]
    pub project_type: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    pub client: Option<ClientSelection>,
    pub assigned_staff_id: Option<DbId>,
    pub project_manager_id: Option<DbId>,
    pub lead_drafter_id: Option<DbId>,
    pub start_date: Option<Date>,
    pub deadline: Option<Date>,
    pub notes: Option<String>,
    /// Named phase template; defaults to `standard` when no ad-hoc phases
    /// are supplied.
    pub template: Option<PhaseTemplate>,
    /// Ad-hoc phase list. Takes precedence over `template` when present.
    pub phases: Option<Vec<NewPhase>>,
}

/// A project with its phases and computed progress, as returned by
/// `GET /projects/{id}`.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub phases: Vec<Phase>,
    /// Completion-weighted overall progress, 0-100.
    pub progress: u8,
}

pub(crate) fn project_detail(project: Project, phases: Vec<Phase>) -> ProjectDetail {
    let snapshots: Vec<PhaseSnapshot> = phases.iter().map(Phase::snapshot).collect();
    let progress = progress::project_progress(&snapshots);
    ProjectDetail {
        project,
        phases,
        progress,
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/projects
///
/// Create a project: validate, resolve the client, assemble phases from the
/// template (or the ad-hoc list), insert everything in one transaction, then
/// kick off the fire-and-forget workflow sync.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<Project>)> {
    if !policy::can_create_project(user.actor()) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have permission to create new projects".into(),
        )));
    }

    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    validate_date_range(input.start_date, input.deadline).map_err(AppError::Core)?;

    let client = resolve_client(&state, input.client.as_ref()).await?;

    let phases = assemble_phases(&input)?;

    let project_number = next_project_number(&state).await?;

    let staff_assigned = input.assigned_staff_id.is_some()
        || input.project_manager_id.is_some()
        || input.lead_drafter_id.is_some();
    let status = ProjectStatus::initial(staff_assigned);

    let template_used = if input.phases.is_some() {
        None
    } else {
        Some(
            input
                .template
                .unwrap_or(PhaseTemplate::Standard)
                .as_str()
                .to_string(),
        )
    };

    let new_project = NewProject {
        project_number: project_number.clone(),
        project_name: input.project_name.trim().to_string(),
        project_type: input.project_type.clone(),
        address: input.address.trim().to_string(),
        client_id: client.as_ref().map(|c| c.id),
        assigned_staff_id: input.assigned_staff_id,
        project_manager_id: input.project_manager_id,
        lead_drafter_id: input.lead_drafter_id,
        start_date: input.start_date,
        deadline: input.deadline,
        status: status.as_str().to_string(),
        notes: input.notes.clone(),
        template_used: template_used.clone(),
        created_by: user.profile_id,
    };

    let project = ProjectRepo::create(&state.pool, &new_project, &phases).await?;
    tracing::info!(
        project_id = project.id,
        project_number = %project.project_number,
        "Project created"
    );

    record_activity(
        &state.pool,
        project.id,
        actions::PROJECT_CREATED,
        user.profile_id,
        audit::project_created_details(
            &project.project_number,
            template_used.as_deref().unwrap_or("ad_hoc"),
            phases.len(),
        ),
    )
    .await;

    if let Some(client) = client {
        spawn_project_sync(
            &state,
            WorkflowItemPayload {
                project_name: project.project_name.clone(),
                client_name: client.full_name,
                client_email: client.email,
                project_type: project.project_type.clone(),
                status: project.status.clone(),
                project_id: project.id,
                address: project.address.clone(),
            },
        );
    }

    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
///
/// Staff-only listing with status/search filters and whitelisted sorting.
/// Drafters only see projects assigned to them.
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Query(mut params): Query<ProjectQuery>,
) -> AppResult<Json<Vec<Project>>> {
    if user.role == Role::StaffDrafter {
        params.assigned_staff_id = Some(user.profile_id);
    }
    let projects = ProjectRepo::list(&state.pool, &params).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
///
/// Visible to staff and to the owning client. Embeds phases and progress.
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectDetail>> {
    let project = find_project(&state, id).await?;
    if !policy::can_view_project(user.actor(), &project.stakeholders()) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this project".into(),
        )));
    }
    let phases = PhaseRepo::list_for_project(&state.pool, id).await?;
    Ok(Json(project_detail(project, phases)))
}

/// PUT /api/v1/projects/{id}
///
/// Partial update of project header fields (admin/manager only). The
/// start/deadline ordering invariant is checked against the merged values.
pub async fn update(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    let existing = find_project(&state, id).await?;

    if let Some(ref status) = input.status {
        status.parse::<ProjectStatus>().map_err(|e| {
            AppError::Core(CoreError::Validation(e.to_string()))
        })?;
    }
    validate_date_range(
        input.start_date.or(existing.start_date),
        input.deadline.or(existing.deadline),
    )
    .map_err(AppError::Core)?;

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    record_activity(
        &state.pool,
        project.id,
        actions::PROJECT_UPDATED,
        user.profile_id,
        serde_json::json!({ "project_number": project.project_number }),
    )
    .await;

    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
///
/// Admin-only and irreversible. Database rows cascade; stored file objects
/// are removed best-effort afterwards.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !policy::can_delete_project(user.actor()) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only an admin can delete a project".into(),
        )));
    }

    let storage_paths = FileRepo::storage_paths_for_project(&state.pool, id).await?;

    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }
    tracing::info!(project_id = id, deleted_by = user.profile_id, "Project deleted");

    // The rows are gone; leftover blobs only waste space, so failures here
    // degrade to warnings.
    for path in storage_paths {
        if let Err(error) = state.storage.delete(&path).await {
            tracing::warn!(project_id = id, %path, %error, "Failed to remove stored file");
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) async fn find_project(state: &AppState, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

/// Identity of the resolved client, for the project row and sync payload.
struct ResolvedClient {
    id: DbId,
    full_name: String,
    email: String,
}

/// Resolve the client selection to a profile id.
///
/// The new-client path reuses an existing `client`-role profile with the
/// same email, rejects emails already held by staff accounts, and otherwise
/// creates a password-less client profile for later account setup.
async fn resolve_client(
    state: &AppState,
    selection: Option<&ClientSelection>,
) -> AppResult<Option<ResolvedClient>> {
    let Some(selection) = selection else {
        return Ok(None);
    };

    match selection {
        ClientSelection::Existing { client_id } => {
            let profile = ProfileRepo::find_by_id(&state.pool, *client_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Client",
                    id: *client_id,
                }))?;
            if profile.role != Role::Client.as_str() {
                return Err(AppError::Core(CoreError::Conflict(format!(
                    "Profile {} is not a client account",
                    profile.email
                ))));
            }
            Ok(Some(ResolvedClient {
                id: profile.id,
                full_name: profile.full_name,
                email: profile.email,
            }))
        }
        ClientSelection::New { full_name, email } => {
            let full_name = full_name.trim();
            let email = email.trim();
            if full_name.is_empty() || email.is_empty() {
                return Err(AppError::Core(CoreError::Validation(
                    "New client name and email are required".into(),
                )));
            }

            if let Some(existing) = ProfileRepo::find_by_email(&state.pool, email).await? {
                if existing.role == Role::Client.as_str() {
                    tracing::info!(
                        client_id = existing.id,
                        "Reusing existing client account for new project"
                    );
                    return Ok(Some(ResolvedClient {
                        id: existing.id,
                        full_name: existing.full_name,
                        email: existing.email,
                    }));
                }
                return Err(AppError::Core(CoreError::Conflict(format!(
                    "Email {email} is already associated with a non-client account"
                ))));
            }

            let created = ProfileRepo::create(
                &state.pool,
                &CreateProfile {
                    email: email.to_string(),
                    full_name: full_name.to_string(),
                    role: Role::Client.as_str().to_string(),
                    password_hash: None,
                },
            )
            .await?;
            Ok(Some(ResolvedClient {
                id: created.id,
                full_name: created.full_name,
                email: created.email,
            }))
        }
    }
}

/// Build the phase rows for a new project from the ad-hoc list or template.
fn assemble_phases(input: &CreateProjectRequest) -> AppResult<Vec<NewPhase>> {
    if let Some(ref phases) = input.phases {
        if phases.is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "A project needs at least one phase".into(),
            )));
        }
        for phase in phases {
            if phase.name.trim().is_empty() || phase.code.trim().is_empty() {
                return Err(AppError::Core(CoreError::Validation(
                    "Every phase needs a name and a code".into(),
                )));
            }
            if phase.estimated_hours < 0.0 {
                return Err(AppError::Core(CoreError::Validation(
                    "Estimated hours cannot be negative".into(),
                )));
            }
        }
        return Ok(phases.clone());
    }

    let template = input.template.unwrap_or(PhaseTemplate::Standard);
    Ok(template
        .phases()
        .iter()
        .map(|seed| NewPhase {
            name: seed.name.to_string(),
            code: seed.code.to_string(),
            estimated_hours: f64::from(seed.estimated_hours),
            description: Some(seed.description.to_string()),
            assigned_staff_id: input.assigned_staff_id,
            start_date: None,
            end_date: None,
        })
        .collect())
}

/// Generate the next `PRJ-YYYY-NNN` number from this year's project count.
async fn next_project_number(state: &AppState) -> AppResult<String> {
    let year = Utc::now().year();
    let prefix = format!("PRJ-{year}-");
    let count = ProjectRepo::count_with_number_prefix(&state.pool, &prefix).await?;
    Ok(format!("{prefix}{:03}", count + 1))
}
