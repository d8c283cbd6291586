//! HTTP service for the Jupiter Automation project portal.
//!
//! Exposed as a library so integration tests can build the exact production
//! router (`router::build_app_router`) against a test database.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;
pub mod storage;
pub mod sync;
