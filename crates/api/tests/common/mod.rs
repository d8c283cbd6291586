//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the production router (same middleware stack as `main.rs`) over a
//! test database pool, plus request/seeding helpers.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use jupiter_api::auth::jwt::JwtConfig;
use jupiter_api::auth::password::hash_password;
use jupiter_api::config::ServerConfig;
use jupiter_api::router::build_app_router;
use jupiter_api::state::AppState;
use jupiter_api::storage::LocalFileStore;
use jupiter_db::models::profile::{CreateProfile, Profile};
use jupiter_db::repositories::ProfileRepo;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        storage_root: std::env::temp_dir().join("jupiter-api-tests"),
        public_base_url: "http://localhost:3000".to_string(),
        workflow_sync_url: None,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Workflow sync stays disabled so tests never make
/// outbound requests.
pub fn build_test_app(pool: PgPool) -> axum::Router {
    let config = test_config();
    std::fs::create_dir_all(&config.storage_root).expect("storage root should be creatable");
    let storage = Arc::new(LocalFileStore::new(
        config.storage_root.clone(),
        config.public_base_url.clone(),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage,
        sync: None,
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    };
    app.oneshot(request).await.expect("request should not fail")
}

pub async fn get(app: axum::Router, uri: &str) -> Response<Body> {
    send(app, "GET", uri, None, None).await
}

pub async fn get_auth(app: axum::Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "GET", uri, Some(token), None).await
}

pub async fn post_json(app: axum::Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, "POST", uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: axum::Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "POST", uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: axum::Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "PUT", uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: axum::Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "DELETE", uri, Some(token), None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

// ---------------------------------------------------------------------------
// Seeding helpers
// ---------------------------------------------------------------------------

/// Create a profile directly in the database and return it plus the
/// plaintext password used.
pub async fn seed_user(pool: &PgPool, email: &str, role: &str) -> (Profile, String) {
    let password = "test_password_123!";
    let hashed = hash_password(password).expect("hashing should succeed");
    let profile = ProfileRepo::create(
        pool,
        &CreateProfile {
            email: email.to_string(),
            full_name: format!("Test {role}"),
            role: role.to_string(),
            password_hash: Some(hashed),
        },
    )
    .await
    .expect("profile creation should succeed");
    (profile, password.to_string())
}

/// Log in via the API and return the access token.
pub async fn login(app: axum::Router, email: &str, password: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(
        response.status(),
        axum::http::StatusCode::OK,
        "login should succeed"
    );
    let json = body_json(response).await;
    json["access_token"]
        .as_str()
        .expect("access_token should be present")
        .to_string()
}

/// Seed a user and log them in, returning `(profile_id, token)`.
pub async fn seed_and_login(
    pool: &PgPool,
    app: axum::Router,
    email: &str,
    role: &str,
) -> (i64, String) {
    let (profile, password) = seed_user(pool, email, role).await;
    let token = login(app, email, &password).await;
    (profile.id, token)
}
