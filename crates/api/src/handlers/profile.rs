//! Handlers for the `/profiles` resource: staff/client directories and
//! admin role management.

use axum::extract::{Path, Query, State};
use axum::Json;
use jupiter_core::error::CoreError;
use jupiter_core::roles::Role;
use jupiter_core::types::DbId;
use jupiter_db::models::profile::ProfileInfo;
use jupiter_db::repositories::ProfileRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::state::AppState;

/// Query parameters for the profile directory.
#[derive(Debug, Default, Deserialize)]
pub struct DirectoryQuery {
    /// `client` for the client list, `staff` (default) for all staff.
    pub role: Option<String>,
}

/// Request body for `PUT /profiles/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

/// GET /api/v1/profiles
///
/// Directory used by assignment pickers: either all clients or all staff.
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Query(params): Query<DirectoryQuery>,
) -> AppResult<Json<Vec<ProfileInfo>>> {
    let profiles = match params.role.as_deref() {
        Some("client") => ProfileRepo::list_by_role(&state.pool, Role::Client.as_str()).await?,
        Some("staff") | None => ProfileRepo::list_staff(&state.pool).await?,
        Some(other) => {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown directory filter: {other:?} (expected 'client' or 'staff')"
            ))))
        }
    };
    Ok(Json(profiles))
}

/// PUT /api/v1/profiles/{id}/role
///
/// Admin-only role promotion/demotion within the closed role set. Admins
/// cannot change their own role, so the last admin cannot lock everyone out.
pub async fn update_role(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRoleRequest>,
) -> AppResult<Json<ProfileInfo>> {
    if admin.profile_id == id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You cannot change your own role".into(),
        )));
    }

    let profile = ProfileRepo::update_role(&state.pool, id, input.role.as_str())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id,
        }))?;

    tracing::info!(
        profile_id = id,
        new_role = %input.role,
        changed_by = admin.profile_id,
        "Profile role changed"
    );

    Ok(Json(profile.into()))
}
