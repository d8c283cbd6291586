//! HTTP-level integration tests for authentication, identity resolution,
//! and admin role management.
//!
//! These run against a real Postgres instance (`DATABASE_URL`), so they are
//! ignored by default; run with `cargo test -- --ignored`.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, put_json_auth, seed_and_login};
use jsonwebtoken::{encode, EncodingKey, Header};
use jupiter_api::auth::jwt::Claims;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Registration and login
// ---------------------------------------------------------------------------

/// Self-registration creates a client profile and allows login.
#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn register_creates_client_profile(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "newclient@test.com",
        "full_name": "New Client",
        "password": "a-long-enough-password",
    });
    let response = post_json(app.clone(), "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["role"], "client", "self-registration is always client");

    let token = common::login(app.clone(), "newclient@test.com", "a-long-enough-password").await;
    let me = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(me.status(), StatusCode::OK);
    let me_json = body_json(me).await;
    assert_eq!(me_json["email"], "newclient@test.com");
    assert_eq!(me_json["full_name"], "New Client");
    assert_eq!(me_json["role"], "client");
}

/// Registering the same email twice returns 409.
#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_email_registration_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "email": "dup@test.com",
        "full_name": "First",
        "password": "a-long-enough-password",
    });
    let first = post_json(app.clone(), "/api/v1/auth/register", body.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

/// A short password is rejected before any profile is created.
#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn weak_password_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "email": "weak@test.com",
        "full_name": "Weak",
        "password": "short",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Login with an incorrect password returns 401.
#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn login_wrong_password_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    common::seed_user(&pool, "staff@test.com", "staff_manager").await;

    let body = serde_json::json!({ "email": "staff@test.com", "password": "incorrect" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Fail-closed role handling
// ---------------------------------------------------------------------------

/// A validly signed token whose role is outside the closed set is rejected
/// outright -- never downgraded to a default role.
#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn token_with_unknown_role_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let config = common::test_config();

    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: 1,
        role: "superuser".to_string(),
        exp: now + 600,
        iat: now,
        jti: "test-jti".to_string(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt.secret.as_bytes()),
    )
    .expect("encoding should succeed");

    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Directory access and role management
// ---------------------------------------------------------------------------

/// The profile directory is staff-only.
#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn client_cannot_access_directory(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, client_token) = seed_and_login(&pool, app.clone(), "client@test.com", "client").await;
    let (_, staff_token) =
        seed_and_login(&pool, app.clone(), "drafter@test.com", "staff_drafter").await;

    let denied = get_auth(app.clone(), "/api/v1/profiles?role=client", &client_token).await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    let allowed = get_auth(app, "/api/v1/profiles?role=client", &staff_token).await;
    assert_eq!(allowed.status(), StatusCode::OK);
    let json = body_json(allowed).await;
    assert_eq!(json.as_array().map(Vec::len), Some(1));
}

/// An admin can promote a client; the new role applies at next login.
#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn admin_promotes_client_to_drafter(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, admin_token) = seed_and_login(&pool, app.clone(), "admin@test.com", "staff_admin").await;
    let (client, password) = common::seed_user(&pool, "promoted@test.com", "client").await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/profiles/{}/role", client.id),
        &admin_token,
        serde_json::json!({ "role": "staff_drafter" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["role"], "staff_drafter");

    // The promotion takes effect on the next login.
    let token = common::login(app.clone(), "promoted@test.com", &password).await;
    let me = body_json(get_auth(app, "/api/v1/auth/me", &token).await).await;
    assert_eq!(me["role"], "staff_drafter");
}

/// A manager cannot change roles, and an admin cannot change their own.
#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn role_changes_are_admin_only_and_never_self(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (admin_id, admin_token) =
        seed_and_login(&pool, app.clone(), "admin@test.com", "staff_admin").await;
    let (manager_id, manager_token) =
        seed_and_login(&pool, app.clone(), "manager@test.com", "staff_manager").await;

    let by_manager = put_json_auth(
        app.clone(),
        &format!("/api/v1/profiles/{admin_id}/role"),
        &manager_token,
        serde_json::json!({ "role": "client" }),
    )
    .await;
    assert_eq!(by_manager.status(), StatusCode::FORBIDDEN);

    let self_change = put_json_auth(
        app.clone(),
        &format!("/api/v1/profiles/{admin_id}/role"),
        &admin_token,
        serde_json::json!({ "role": "client" }),
    )
    .await;
    assert_eq!(self_change.status(), StatusCode::FORBIDDEN);

    // A role outside the closed set never deserializes.
    let bogus = put_json_auth(
        app,
        &format!("/api/v1/profiles/{manager_id}/role"),
        &admin_token,
        serde_json::json!({ "role": "staff" }),
    )
    .await;
    assert_eq!(bogus.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ---------------------------------------------------------------------------
// Refresh and logout
// ---------------------------------------------------------------------------

/// Refresh rotates the token pair; the old refresh token stops working.
#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn refresh_rotates_tokens(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, password) = common::seed_user(&pool, "refresher@test.com", "staff_manager").await;

    let login_response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        serde_json::json!({ "email": "refresher@test.com", "password": password }),
    )
    .await;
    let login_json = body_json(login_response).await;
    let refresh_token = login_json["refresh_token"].as_str().unwrap().to_string();

    let refreshed = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(refreshed.status(), StatusCode::OK);

    // The rotated-out token is no longer valid.
    let replay = post_json(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}
