//! Route definitions for the `/profiles` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profiles`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::list))
        .route("/{id}/role", put(profile::update_role))
}
