use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::FileStore;
use crate::sync::WorkflowSync;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: jupiter_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Blob storage for uploaded project files.
    pub storage: Arc<dyn FileStore>,
    /// External work-management sync client; `None` when sync is disabled.
    pub sync: Option<Arc<WorkflowSync>>,
}
