//! Handlers for project file upload, listing, archival, and deletion.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use jupiter_core::audit::actions;
use jupiter_core::error::CoreError;
use jupiter_core::policy;
use jupiter_core::types::DbId;
use jupiter_db::models::file::{FileQuery, NewProjectFile, ProjectFile};
use jupiter_db::repositories::FileRepo;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::comment::find_project_file;
use crate::handlers::phase::require_view;
use crate::handlers::project::find_project;
use crate::handlers::record_activity;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Largest accepted upload.
pub const MAX_FILE_SIZE: usize = 100 * 1024 * 1024; // 100MB

/// Accepted upload types: drawings and the documents that accompany them.
/// Checked by extension and, when the browser provides one, by MIME type.
const ALLOWED_EXTENSIONS: &[(&str, &[&str])] = &[
    ("pdf", &["application/pdf"]),
    ("jpg", &["image/jpeg", "image/jpg"]),
    ("jpeg", &["image/jpeg", "image/jpg"]),
    ("png", &["image/png"]),
    ("mp4", &["video/mp4"]),
    ("dwg", &["application/acad", "application/x-dwg", "image/vnd.dwg"]),
];

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/projects/{id}/files
///
/// Multipart upload: a `file` part plus an optional `phase` text part naming
/// the phase code the file belongs to.
pub async fn upload(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ProjectFile>)> {
    let project = find_project(&state, id).await?;
    if !policy::can_upload_file(user.actor(), &project.stakeholders()) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have permission to upload files to this project".into(),
        )));
    }

    let mut file_part: Option<(String, String, Vec<u8>)> = None;
    let mut phase_code: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("file") => {
                let file_name = field
                    .file_name()
                    .map(sanitize_file_name)
                    .filter(|name| !name.is_empty())
                    .ok_or_else(|| AppError::BadRequest("File part needs a filename".into()))?;
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
                file_part = Some((file_name, content_type, bytes.to_vec()));
            }
            Some("phase") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Malformed phase field: {e}")))?;
                phase_code = Some(text).filter(|t| !t.is_empty());
            }
            _ => {}
        }
    }

    let (file_name, content_type, bytes) =
        file_part.ok_or_else(|| AppError::BadRequest("Missing file part".into()))?;

    validate_upload(&file_name, &content_type, bytes.len()).map_err(AppError::Core)?;

    let storage_path = format!("{id}/{}-{file_name}", Uuid::new_v4());
    state
        .storage
        .put(&storage_path, &bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store file: {e}")))?;

    let file = FileRepo::create(
        &state.pool,
        &NewProjectFile {
            project_id: id,
            file_name: file_name.clone(),
            file_url: state.storage.public_url(&storage_path),
            file_size: bytes.len() as i64,
            file_type: content_type,
            phase_code,
            uploaded_by: user.profile_id,
            storage_path,
        },
    )
    .await?;

    record_activity(
        &state.pool,
        id,
        actions::FILE_UPLOADED,
        user.profile_id,
        serde_json::json!({ "file_id": file.id, "file_name": file_name }),
    )
    .await;

    Ok((StatusCode::CREATED, Json(file)))
}

/// GET /api/v1/projects/{id}/files
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Query(params): Query<FileQuery>,
) -> AppResult<Json<Vec<ProjectFile>>> {
    let project = find_project(&state, id).await?;
    require_view(&user, &project)?;
    let files = FileRepo::list_for_project(&state.pool, id, &params).await?;
    Ok(Json(files))
}

/// POST /api/v1/projects/{id}/files/{file_id}/archive
///
/// Soft-delete: the row is flagged and drops out of default listings; the
/// stored object stays.
pub async fn archive(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, file_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let file = find_project_file(&state, id, file_id).await?;
    if !policy::can_delete_file(user.actor(), file.uploaded_by) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have permission to archive this file".into(),
        )));
    }

    FileRepo::archive(&state.pool, file.id).await?;
    record_activity(
        &state.pool,
        id,
        actions::FILE_ARCHIVED,
        user.profile_id,
        serde_json::json!({ "file_id": file.id, "file_name": file.file_name }),
    )
    .await;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/projects/{id}/files/{file_id}
///
/// Hard-delete: removes the storage object, then the record. If the object
/// cannot be removed the record is kept so the two stay consistent.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, file_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let file = find_project_file(&state, id, file_id).await?;
    if !policy::can_delete_file(user.actor(), file.uploaded_by) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have permission to delete this file".into(),
        )));
    }

    state
        .storage
        .delete(&file.storage_path)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to remove stored file: {e}")))?;

    FileRepo::delete(&state.pool, file.id).await?;
    record_activity(
        &state.pool,
        id,
        actions::FILE_DELETED,
        user.profile_id,
        serde_json::json!({ "file_id": file.id, "file_name": file.file_name }),
    )
    .await;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Strip any path components from a client-supplied filename.
fn sanitize_file_name(name: &str) -> String {
    name.rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Enforce the size cap and the drawing/document type allow-list.
fn validate_upload(file_name: &str, content_type: &str, size: usize) -> Result<(), CoreError> {
    if size == 0 {
        return Err(CoreError::Validation("File is empty".into()));
    }
    if size > MAX_FILE_SIZE {
        return Err(CoreError::Validation(format!(
            "File {file_name} exceeds the 100MB limit"
        )));
    }

    let extension = file_name
        .rsplit('.')
        .next()
        .map(str::to_lowercase)
        .unwrap_or_default();
    let Some((_, mime_types)) = ALLOWED_EXTENSIONS
        .iter()
        .find(|(ext, _)| *ext == extension)
    else {
        return Err(CoreError::Validation(format!(
            "File type .{extension} is not accepted (pdf, jpg, png, mp4, dwg)"
        )));
    };

    // Browsers sometimes omit or mislabel DWG MIME types, so an empty
    // content type passes as long as the extension is accepted.
    if !content_type.is_empty()
        && content_type != "application/octet-stream"
        && !mime_types.iter().any(|mime| *mime == content_type)
    {
        return Err(CoreError::Validation(format!(
            "Content type {content_type} does not match .{extension}"
        )));
    }
    Ok(())
}
