//! Route definitions.

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod profiles;
pub mod projects;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/me                                         identity tuple (requires auth)
///
/// /profiles                                        staff/client directory (staff)
/// /profiles/{id}/role                              change role (admin only)
///
/// /projects                                        list (staff), create (manager)
/// /projects/{id}                                   get, update, delete
/// /projects/{id}/activity                          activity feed (staff)
/// /projects/{id}/phases                            list phases
/// /projects/{id}/phases/{index}                    edit phase
/// /projects/{id}/phases/{index}/time               log, list time entries
/// /projects/{id}/phases/{index}/comments           post, list comments
/// /projects/{id}/files                             upload, list files
/// /projects/{id}/files/{file_id}/archive           archive file
/// /projects/{id}/files/{file_id}                   delete file
/// /projects/{id}/files/{file_id}/comments          post, list comments
///
/// /dashboard                                       client project view
/// /dashboard/summary                               staff status tiles
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/profiles", profiles::router())
        .nest("/projects", projects::router())
        .nest("/dashboard", dashboard::router())
}
