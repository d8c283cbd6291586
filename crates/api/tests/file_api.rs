//! HTTP-level integration tests for project file upload, archival, and
//! deletion.
//!
//! These run against a real Postgres instance (`DATABASE_URL`), so they are
//! ignored by default; run with `cargo test -- --ignored`.

mod common;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, StatusCode};
use common::{body_json, delete_auth, get_auth, post_json_auth, seed_and_login};
use sqlx::PgPool;
use tower::ServiceExt;

const BOUNDARY: &str = "jupiter-test-boundary";

/// Build a multipart upload request with a single file part and an optional
/// phase code part.
fn upload_request(
    uri: &str,
    token: &str,
    file_name: &str,
    content_type: &str,
    bytes: &[u8],
    phase: Option<&str>,
) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(b"\r\n");
    if let Some(phase) = phase {
        body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"phase\"\r\n\r\n{phase}\r\n")
                .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request should build")
}

async fn create_project(app: axum::Router, manager_token: &str) -> i64 {
    let payload = serde_json::json!({
        "project_name": "Mill Conversion",
        "type": "renovation",
        "address": "12 Mill Lane",
        "template": "renovation",
    });
    let response = post_json_auth(app, "/api/v1/projects", manager_token, payload).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Upload, list, archive: archived files drop out of the default listing.
#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn upload_list_and_archive(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, manager_token) =
        seed_and_login(&pool, app.clone(), "manager@test.com", "staff_manager").await;
    let project_id = create_project(app.clone(), &manager_token).await;
    let uri = format!("/api/v1/projects/{project_id}/files");

    let response = app
        .clone()
        .oneshot(upload_request(
            &uri,
            &manager_token,
            "site-plan.pdf",
            "application/pdf",
            b"%PDF-1.4 test content",
            Some("EC"),
        ))
        .await
        .expect("request should not fail");
    assert_eq!(response.status(), StatusCode::CREATED);
    let file = body_json(response).await;
    assert_eq!(file["file_name"], "site-plan.pdf");
    assert_eq!(file["phase_code"], "EC");
    assert!(file["file_url"].as_str().unwrap().contains("/files/"));
    let file_id = file["id"].as_i64().unwrap();

    let listed = body_json(get_auth(app.clone(), &uri, &manager_token).await).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let archived = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("{uri}/{file_id}/archive"))
                .header(AUTHORIZATION, format!("Bearer {manager_token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(archived.status(), StatusCode::NO_CONTENT);

    let after = body_json(get_auth(app.clone(), &uri, &manager_token).await).await;
    assert_eq!(after.as_array().map(Vec::len), Some(0));

    let with_archived = body_json(
        get_auth(app, &format!("{uri}?include_archived=true"), &manager_token).await,
    )
    .await;
    assert_eq!(with_archived.as_array().map(Vec::len), Some(1));
}

/// Upload permission follows the policy: clients never, unassigned drafters
/// never, assigned drafters yes.
#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn upload_permissions(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, manager_token) =
        seed_and_login(&pool, app.clone(), "manager@test.com", "staff_manager").await;
    let (_, client_token) = seed_and_login(&pool, app.clone(), "client@test.com", "client").await;
    let (_, drafter_token) =
        seed_and_login(&pool, app.clone(), "drafter@test.com", "staff_drafter").await;
    let project_id = create_project(app.clone(), &manager_token).await;
    let uri = format!("/api/v1/projects/{project_id}/files");

    for token in [&client_token, &drafter_token] {
        let response = app
            .clone()
            .oneshot(upload_request(
                &uri,
                token,
                "plan.pdf",
                "application/pdf",
                b"%PDF-1.4",
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}

/// Disallowed file types are rejected before anything is stored.
#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn disallowed_file_type_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, manager_token) =
        seed_and_login(&pool, app.clone(), "manager@test.com", "staff_manager").await;
    let project_id = create_project(app.clone(), &manager_token).await;
    let uri = format!("/api/v1/projects/{project_id}/files");

    let response = app
        .clone()
        .oneshot(upload_request(
            &uri,
            &manager_token,
            "notes.txt",
            "text/plain",
            b"hello",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let listed = body_json(get_auth(app, &uri, &manager_token).await).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(0));
}

/// Hard delete removes the record; only managers or the uploader may do it.
#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn delete_requires_uploader_or_manager(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, manager_token) =
        seed_and_login(&pool, app.clone(), "manager@test.com", "staff_manager").await;
    let (drafter_id, drafter_token) =
        seed_and_login(&pool, app.clone(), "drafter@test.com", "staff_drafter").await;

    // Assign the drafter so they can upload.
    let payload = serde_json::json!({
        "project_name": "Mill Conversion",
        "type": "renovation",
        "address": "12 Mill Lane",
        "assigned_staff_id": drafter_id,
    });
    let project = body_json(post_json_auth(app.clone(), "/api/v1/projects", &manager_token, payload).await).await;
    let project_id = project["id"].as_i64().unwrap();
    let uri = format!("/api/v1/projects/{project_id}/files");

    let uploaded = app
        .clone()
        .oneshot(upload_request(
            &uri,
            &manager_token,
            "stamped.pdf",
            "application/pdf",
            b"%PDF-1.4 stamped",
            None,
        ))
        .await
        .unwrap();
    let file_id = body_json(uploaded).await["id"].as_i64().unwrap();

    // The drafter did not upload this file and is not a manager.
    let by_drafter =
        delete_auth(app.clone(), &format!("{uri}/{file_id}"), &drafter_token).await;
    assert_eq!(by_drafter.status(), StatusCode::FORBIDDEN);

    let by_manager =
        delete_auth(app.clone(), &format!("{uri}/{file_id}"), &manager_token).await;
    assert_eq!(by_manager.status(), StatusCode::NO_CONTENT);

    let listed = body_json(get_auth(app, &format!("{uri}?include_archived=true"), &manager_token).await).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(0));
}
