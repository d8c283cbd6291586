//! Handlers for phase-level and file-level comments.
//!
//! Comments are append-only and require nothing beyond the ability to view
//! the project, so a client can discuss progress on their own project.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use jupiter_core::audit::actions;
use jupiter_core::error::CoreError;
use jupiter_core::types::DbId;
use jupiter_core::validate::validate_comment_text;
use jupiter_db::models::comment::{CommentWithAuthor, NewComment};
use jupiter_db::repositories::{CommentRepo, FileRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::phase::{find_phase, require_view};
use crate::handlers::project::find_project;
use crate::handlers::record_activity;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for posting a comment.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub comment: String,
}

/// POST /api/v1/projects/{id}/phases/{index}/comments
pub async fn create_phase_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, index)): Path<(DbId, i32)>,
    Json(input): Json<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<CommentWithAuthor>)> {
    let project = find_project(&state, id).await?;
    require_view(&user, &project)?;
    find_phase(&state, &project, index).await?;
    validate_comment_text(&input.comment).map_err(AppError::Core)?;

    let comment = CommentRepo::create(
        &state.pool,
        &NewComment {
            project_id: id,
            phase_index: Some(index),
            file_id: None,
            comment: input.comment.trim().to_string(),
            created_by: user.profile_id,
        },
    )
    .await?;

    record_activity(
        &state.pool,
        id,
        actions::COMMENT_ADDED,
        user.profile_id,
        serde_json::json!({ "phase_index": index }),
    )
    .await;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// GET /api/v1/projects/{id}/phases/{index}/comments
pub async fn list_phase_comments(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, index)): Path<(DbId, i32)>,
) -> AppResult<Json<Vec<CommentWithAuthor>>> {
    let project = find_project(&state, id).await?;
    require_view(&user, &project)?;
    let comments = CommentRepo::list_for_phase(&state.pool, id, index).await?;
    Ok(Json(comments))
}

/// POST /api/v1/projects/{id}/files/{file_id}/comments
pub async fn create_file_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, file_id)): Path<(DbId, DbId)>,
    Json(input): Json<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<CommentWithAuthor>)> {
    let project = find_project(&state, id).await?;
    require_view(&user, &project)?;
    let file = find_project_file(&state, id, file_id).await?;
    validate_comment_text(&input.comment).map_err(AppError::Core)?;

    let comment = CommentRepo::create(
        &state.pool,
        &NewComment {
            project_id: id,
            phase_index: None,
            file_id: Some(file.id),
            comment: input.comment.trim().to_string(),
            created_by: user.profile_id,
        },
    )
    .await?;

    record_activity(
        &state.pool,
        id,
        actions::COMMENT_ADDED,
        user.profile_id,
        serde_json::json!({ "file_id": file.id }),
    )
    .await;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// GET /api/v1/projects/{id}/files/{file_id}/comments
pub async fn list_file_comments(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, file_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Vec<CommentWithAuthor>>> {
    let project = find_project(&state, id).await?;
    require_view(&user, &project)?;
    let file = find_project_file(&state, id, file_id).await?;
    let comments = CommentRepo::list_for_file(&state.pool, file.id).await?;
    Ok(Json(comments))
}

/// Fetch a file and confirm it belongs to the given project.
pub(crate) async fn find_project_file(
    state: &AppState,
    project_id: DbId,
    file_id: DbId,
) -> AppResult<jupiter_db::models::file::ProjectFile> {
    let file = FileRepo::find_by_id(&state.pool, file_id)
        .await?
        .filter(|file| file.project_id == project_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "File",
            id: file_id,
        }))?;
    Ok(file)
}
