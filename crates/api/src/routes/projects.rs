//! Route definitions for the `/projects` resource and its nested phase,
//! time, comment, file, and activity routes.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::file::MAX_FILE_SIZE;
use crate::handlers::{activity, comment, file, phase, project};
use crate::state::AppState;

/// Routes mounted at `/projects`.
pub fn router() -> Router<AppState> {
    let phase_routes = Router::new()
        .route("/", get(phase::list))
        .route("/{index}", put(phase::update))
        .route("/{index}/time", get(phase::list_time).post(phase::log_time))
        .route(
            "/{index}/comments",
            get(comment::list_phase_comments).post(comment::create_phase_comment),
        );

    let file_routes = Router::new()
        .route("/", get(file::list).post(file::upload))
        .route("/{file_id}", axum::routing::delete(file::delete))
        .route("/{file_id}/archive", post(file::archive))
        .route(
            "/{file_id}/comments",
            get(comment::list_file_comments).post(comment::create_file_comment),
        )
        // Uploads carry whole drawing sets; lift the default body cap.
        .layer(DefaultBodyLimit::max(MAX_FILE_SIZE + 1024 * 1024));

    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/activity", get(activity::list))
        .nest("/{id}/phases", phase_routes)
        .nest("/{id}/files", file_routes)
}
